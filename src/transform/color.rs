use crate::types::color::{ColorScale, HexColor, Rgb};

impl ColorScale {
    /// Interpolates the color for a Celsius value.
    ///
    /// Stops are scanned in ascending order and the first pair that brackets
    /// `celsius` (inclusive on both ends) is used. Each channel is interpolated
    /// linearly and truncated. Values outside every bracket, including NaN,
    /// get the fallback color.
    pub fn rgb_for(&self, celsius: f64) -> Rgb {
        for pair in self.stops().windows(2) {
            let (lower, upper) = (pair[0], pair[1]);
            if celsius >= lower.threshold && celsius <= upper.threshold {
                let ratio = (celsius - lower.threshold) / (upper.threshold - lower.threshold);
                return Rgb(
                    channel(lower.color.0, upper.color.0, ratio),
                    channel(lower.color.1, upper.color.1, ratio),
                    channel(lower.color.2, upper.color.2, ratio),
                );
            }
        }
        self.fallback()
    }

    pub fn color_for(&self, celsius: f64) -> HexColor {
        self.rgb_for(celsius).to_hex()
    }
}

fn channel(from: u8, to: u8, ratio: f64) -> u8 {
    let value = f64::from(from) + ratio * (f64::from(to) - f64::from(from));
    value.trunc().clamp(0.0, 255.0) as u8
}
