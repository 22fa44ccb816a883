//! Panel register configuration used by the bring-up sequence.

/// Register values sent by
/// [`Ssd1306::initialize_device()`](crate::Ssd1306::initialize_device).
///
/// [`PanelConfig::default()`] is the 128×64 module configuration.
/// [`PanelConfig::for_height()`] derives the geometry-dependent registers
/// (multiplex ratio and COM pin layout) from the panel height and keeps
/// the rest at their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelConfig {
    /// Display clock divide ratio / oscillator frequency. Default: 0x80.
    pub clock_div: u8,
    /// Multiplex ratio, `rows - 1` (0x0F–0x3F). Default: 0x3F.
    pub multiplex: u8,
    /// COM pins hardware configuration. Default: 0x12 (alternative, 64 rows).
    pub com_pins: u8,
    /// Vertical display offset. Default: 0x00.
    pub display_offset: u8,
    /// Charge pump setting. Default: 0x14 (enabled, internal VCC).
    pub charge_pump: u8,
    /// Contrast. Default: 0x8F.
    pub contrast: u8,
    /// Pre-charge period. Default: 0xF1.
    pub precharge: u8,
    /// VCOMH deselect level. Default: 0x40.
    pub vcomh_deselect: u8,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            clock_div: 0x80,
            multiplex: 0x3F,
            com_pins: 0x12,
            display_offset: 0x00,
            charge_pump: 0x14,
            contrast: 0x8F,
            precharge: 0xF1,
            vcomh_deselect: 0x40,
        }
    }
}

impl PanelConfig {
    /// Configuration for a panel `height` rows tall.
    ///
    /// Panels of 32 rows or fewer use sequential COM pins (0x02); taller
    /// panels use the alternative layout (0x12). The multiplex ratio is
    /// clamped to the controller's 16–64 row range; shorter panels drive
    /// 16 rows and leave the unused COM lines blank.
    pub fn for_height(height: usize) -> Self {
        let rows = height.clamp(16, 64);
        let com_pins = if rows > 32 { 0x12 } else { 0x02 };

        Self {
            multiplex: (rows - 1) as u8,
            com_pins,
            ..Self::default()
        }
    }
}
