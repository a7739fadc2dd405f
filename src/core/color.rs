#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8, // Red channel (0 - 255)
    pub g: u8, // Green channel (0 - 255)
    pub b: u8, // Blue channel (0 - 255)
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a hexadecimal string.
    /// Accepts formats like "#RRGGBB" or "RRGGBB".
    pub fn from_hex(hex: &str) -> Result<Self, &'static str> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err("Hex string should be 6 characters long (RRGGBB).");
        }

        let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| "Invalid red component in hex")?;
        let g =
            u8::from_str_radix(&hex[2..4], 16).map_err(|_| "Invalid green component in hex")?;
        let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| "Invalid blue component in hex")?;

        Ok(Self::new(r, g, b))
    }

    const fn hex_char_to_u8(c: u8) -> u8 {
        match c {
            b'0'..=b'9' => c - b'0',
            b'a'..=b'f' => c - b'a' + 10,
            b'A'..=b'F' => c - b'A' + 10,
            _ => 0,
        }
    }

    const fn hex_pair_to_u8(high: u8, low: u8) -> u8 {
        (Self::hex_char_to_u8(high) << 4) | Self::hex_char_to_u8(low)
    }

    /// Const-context hex parser for the named colors below. Invalid digits read as 0.
    const fn hex(hex: &str) -> Self {
        let bytes = hex.as_bytes();
        let offset = if bytes[0] == b'#' { 1 } else { 0 };

        Self {
            r: Self::hex_pair_to_u8(bytes[offset], bytes[offset + 1]),
            g: Self::hex_pair_to_u8(bytes[offset + 2], bytes[offset + 3]),
            b: Self::hex_pair_to_u8(bytes[offset + 4], bytes[offset + 5]),
        }
    }

    /// Scale every channel by `intensity`, clamped to [0, 1] first.
    /// Channels are truncated, so 255 * 0.5 gives 127.
    pub fn shade(&self, intensity: f64) -> Color {
        let intensity = intensity.clamp(0.0, 1.0);
        // NaN survives clamp; treat it as unlit
        let intensity = if intensity.is_nan() { 0.0 } else { intensity };
        Color {
            r: (self.r as f64 * intensity) as u8,
            g: (self.g as f64 * intensity) as u8,
            b: (self.b as f64 * intensity) as u8,
        }
    }

    /// Convert the color to a terminal-compatible ANSI escape sequence.
    pub fn to_ansii_escape(&self) -> String {
        format!("\x1b[38;2;{};{};{}m", self.r, self.g, self.b)
    }

    /// 0x00RRGGBB, the layout minifb expects.
    pub fn to_u32(&self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    pub fn to_rgb(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

// Predefined colors
impl Color {
    pub const BLACK: Color = Color::hex("000000");
    pub const GRAY: Color = Color::hex("808080");
    pub const WHITE: Color = Color::hex("FFFFFF");
    pub const RED: Color = Color::hex("FF0000");
    pub const GREEN: Color = Color::hex("00FF00");
    pub const BLUE: Color = Color::hex("0000FF");
    pub const YELLOW: Color = Color::hex("FFFF00");
    pub const MAGENTA: Color = Color::hex("FF00FF");
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}
