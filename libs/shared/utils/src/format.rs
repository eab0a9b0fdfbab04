/// Display price in rupees, e.g. `₹1500`.
pub fn format_inr(amount: u32) -> String {
    format!("₹{}", amount)
}

/// Parses a display price such as `₹1,500` back into rupees.
pub fn parse_inr(text: &str) -> Option<u32> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}
