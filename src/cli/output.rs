use colored::Colorize;

/// Formats an amount as dollars, keeping the minus sign ahead of the
/// currency symbol: `-$36.05`.
pub fn money(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${:.2}", amount)
    }
}

/// Money string coloured by sign: green at or above zero, red below.
pub fn signed_money(amount: f64) -> String {
    let text = money(amount);
    if amount < 0.0 {
        text.red().to_string()
    } else {
        text.green().to_string()
    }
}

pub fn print_section(title: &str) {
    println!("\n{}", format!("=== {} ===", title).bold());
}

pub fn print_success(message: &str) {
    println!("{}", message.green());
}

pub fn print_warning(message: &str) {
    println!("{}", message.yellow());
}

pub fn print_detail(message: &str) {
    println!("  {}", message);
}

pub fn dim(text: &str) -> String {
    text.dimmed().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_places_the_sign_before_the_symbol() {
        assert_eq!(money(263.953), "$263.95");
        assert_eq!(money(-36.046), "-$36.05");
        assert_eq!(money(0.0), "$0.00");
    }
}
