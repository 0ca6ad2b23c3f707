/// A packed 5-6-5 RGB pixel, the native format of the framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb565(pub u16);

impl Rgb565 {
    pub const BLACK: Rgb565 = Rgb565(0x0000);
    pub const WHITE: Rgb565 = Rgb565(0xFFFF);
    pub const GREEN: Rgb565 = Rgb565(0x07E0);
    pub const SKY_BLUE: Rgb565 = Rgb565(0x841F);
    pub const P1_YELLOW: Rgb565 = Rgb565(0xFFE0);
    pub const P2_RED: Rgb565 = Rgb565(0xF800);
    pub const BEAK: Rgb565 = Rgb565(0xFC00);

    /// Expand to 8-bit channels, replicating the high bits into the low ones
    /// so that full intensity maps to 255.
    pub const fn to_rgb888(self) -> (u8, u8, u8) {
        let r = ((self.0 >> 11) & 0x1F) as u8;
        let g = ((self.0 >> 5) & 0x3F) as u8;
        let b = (self.0 & 0x1F) as u8;
        ((r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2))
    }

    pub const fn from_rgb888(r: u8, g: u8, b: u8) -> Rgb565 {
        Rgb565((((r as u16) >> 3) << 11) | (((g as u16) >> 2) << 5) | ((b as u16) >> 3))
    }
}
