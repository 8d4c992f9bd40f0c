//! Countdown bar rendering
//!
//! Turns a tick into a single text line: `[#########---] label 3s`.

const FILLED: char = '#';
const EMPTY: char = '-';

/// Get fill fraction for countdown display (1.0 = full, 0.0 = expired)
pub fn fill_fraction(remaining: i64, total: i64) -> f32 {
    if total <= 0 {
        return 0.0;
    }
    (remaining as f32 / total as f32).clamp(0.0, 1.0)
}

/// Render one countdown line with a bar `width` cells wide
pub fn render(label: &str, remaining: i64, total: i64, width: u16) -> String {
    let width = usize::from(width);
    let filled = ((fill_fraction(remaining, total) * width as f32).round() as usize).min(width);

    let mut line = String::with_capacity(width + label.len() + 16);
    line.push('[');
    line.extend(std::iter::repeat_n(FILLED, filled));
    line.extend(std::iter::repeat_n(EMPTY, width - filled));
    line.push(']');
    line.push(' ');
    line.push_str(label);
    line.push_str(&format!(" {}s", remaining.max(0)));
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_fraction_bounds() {
        assert_eq!(fill_fraction(10, 10), 1.0);
        assert_eq!(fill_fraction(5, 10), 0.5);
        assert_eq!(fill_fraction(0, 10), 0.0);
        assert_eq!(fill_fraction(-2, 10), 0.0);
        assert_eq!(fill_fraction(3, 0), 0.0);
        assert_eq!(fill_fraction(3, -4), 0.0);
    }

    #[test]
    fn test_render_half_bar() {
        assert_eq!(render("quiz", 5, 10, 10), "[#####-----] quiz 5s");
    }

    #[test]
    fn test_render_expired_bar() {
        assert_eq!(render("quiz", 0, 3, 6), "[------] quiz 0s");
        assert_eq!(render("late", -1, 0, 4), "[----] late 0s");
    }

    #[test]
    fn test_render_zero_width() {
        assert_eq!(render("t", 2, 3, 0), "[] t 2s");
    }
}
