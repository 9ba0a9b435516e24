//! Plain-text rendering of a [`StabilityReport`].

use crate::analysis::StabilityReport;
use crate::hurwitz::HurwitzAnalysis;
use crate::plant::FeedbackSystem;
use crate::polynomial::Polynomial;
use crate::roots::RootAnalysis;
use crate::routh::RouthAnalysis;
use std::fmt::Write;

/// Digits used for table, minor and coefficient values.
pub const TABLE_DIGITS: usize = 4;
/// Digits used for root components.
pub const ROOT_DIGITS: usize = 6;

/// Formats `value` like C's `%.{digits}g`: `digits` significant digits,
/// trailing zeros removed, scientific notation for very small or large
/// magnitudes.
pub fn format_significant(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let digits = digits.max(1);
    let scientific = format!("{:.*e}", digits - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

/// Renders `poly` as `c s^n + ... + c s + c`.
pub fn format_polynomial(poly: &Polynomial, digits: usize) -> String {
    let degree = poly.degree();
    poly.coefficients()
        .iter()
        .enumerate()
        .map(|(idx, &c)| {
            let value = format_significant(c, digits);
            match degree - idx {
                0 => value,
                1 => format!("{value} s"),
                power => format!("{value} s^{power}"),
            }
        })
        .collect::<Vec<_>>()
        .join(" + ")
}

pub fn format_header(system: &FeedbackSystem) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "STABILITY ANALYSIS OF THE CLOSED-LOOP SYSTEM");
    let _ = writeln!(
        out,
        "W_open(s) = ({}) / ({})",
        format_polynomial(system.numerator(), TABLE_DIGITS),
        format_polynomial(system.open_denominator(), TABLE_DIGITS)
    );
    let _ = writeln!(out, "W(s) = W_open(s) / (1 + W_open(s))");
    let _ = writeln!(
        out,
        "D(s) = {}",
        format_polynomial(system.closed_denominator(), TABLE_DIGITS)
    );
    out
}

pub fn format_routh_section(poly: &Polynomial, routh: &RouthAnalysis) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== ROUTH ===");
    let _ = writeln!(out, "D(s) = {}", format_polynomial(poly, TABLE_DIGITS));
    let _ = writeln!(out);
    let _ = writeln!(out, "Routh table:");
    for row in &routh.table.rows {
        let values = row
            .values
            .iter()
            .map(|&v| format_significant(v, TABLE_DIGITS))
            .collect::<Vec<_>>()
            .join("\t");
        let _ = writeln!(out, "s^{}: {}", row.power, values);
    }
    let first_column = routh
        .first_column
        .iter()
        .map(|&v| format_significant(v, TABLE_DIGITS))
        .collect::<Vec<_>>()
        .join(", ");
    let _ = writeln!(out, "First column: {first_column}");
    let _ = writeln!(out, "Sign changes: {}", routh.sign_changes);
    if routh.table.has_approximations() {
        let _ = writeln!(
            out,
            "Note: a zero pivot was replaced by epsilon; the verdict is approximate."
        );
    }
    let _ = writeln!(out, "Verdict: {}", routh.verdict);
    out
}

pub fn format_hurwitz_section(hurwitz: &HurwitzAnalysis) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== HURWITZ ===");
    for (i, delta) in hurwitz.minors.iter().enumerate() {
        let _ = writeln!(out, "Δ{} = {}", i + 1, format_significant(*delta, TABLE_DIGITS));
    }
    let _ = writeln!(out, "Verdict: {}", hurwitz.verdict);
    out
}

pub fn format_roots_section(roots: &RootAnalysis) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== CHARACTERISTIC ROOTS ===");
    for (i, root) in roots.roots.iter().enumerate() {
        let sign = if root.im >= 0.0 { '+' } else { '-' };
        let _ = writeln!(
            out,
            "s{} = {}  {}  {} j",
            i + 1,
            format_significant(root.re, ROOT_DIGITS),
            sign,
            format_significant(root.im.abs(), ROOT_DIGITS)
        );
    }
    let _ = writeln!(out, "Verdict: {}", roots.verdict);
    out
}

/// Routh, Hurwitz and roots sections separated by blank lines.
pub fn format_report(report: &StabilityReport) -> String {
    [
        format_routh_section(&report.polynomial, &report.routh),
        format_hurwitz_section(&report.hurwitz),
        format_roots_section(&report.roots),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{analyze, AnalysisSettings};
    use crate::plant::PlantConfig;

    #[test]
    fn format_significant_matches_printf_g() {
        assert_eq!(format_significant(0.0, 4), "0");
        assert_eq!(format_significant(50.0, 4), "50");
        assert_eq!(format_significant(1.23456, 4), "1.235");
        assert_eq!(format_significant(-30_000.0, 4), "-3e+04");
        assert_eq!(format_significant(2e-6, 4), "2e-06");
        assert_eq!(format_significant(0.0001, 4), "0.0001");
        assert_eq!(format_significant(9999.5, 4), "1e+04");
        assert_eq!(format_significant(1234.0, 4), "1234");
        assert_eq!(format_significant(-0.02, 4), "-0.02");
        assert_eq!(format_significant(1.5e12, 4), "1.5e+12");
        assert_eq!(format_significant(f64::INFINITY, 4), "inf");
    }

    #[test]
    fn format_polynomial_labels_powers() {
        let poly = Polynomial::new(vec![2e-6, 1e-4, -0.02, 2.0]).expect("valid polynomial");
        assert_eq!(
            format_polynomial(&poly, 4),
            "2e-06 s^3 + 0.0001 s^2 + -0.02 s + 2"
        );
    }

    #[test]
    fn report_sections_appear_in_order() {
        let system = FeedbackSystem::new(&PlantConfig::default()).expect("default plant is valid");
        let report = analyze(&system, &AnalysisSettings::default());
        let text = format_report(&report);

        let routh = text.find("=== ROUTH ===").expect("routh section");
        let hurwitz = text.find("=== HURWITZ ===").expect("hurwitz section");
        let roots = text.find("=== CHARACTERISTIC ROOTS ===").expect("roots section");
        assert!(routh < hurwitz && hurwitz < roots);

        assert!(text.contains("s^3: 1\t-1e+04"));
        assert!(text.contains("s^2: 50\t1e+06"));
        assert!(text.contains("First column: 1, 50, -3e+04, 1e+06"));
        assert!(text.contains("Sign changes: 2"));
        assert!(text.contains("Δ1 = 50"));
        assert!(text.contains("Δ3 = "));
        assert!(text.contains("Verdict: unstable"));
        assert!(!text.contains("Verdict: stable"));
    }

    #[test]
    fn header_names_transfer_functions() {
        let system = FeedbackSystem::new(&PlantConfig::default()).expect("default plant is valid");
        let header = format_header(&system);
        assert!(header.contains("W_open(s) = (1) / (2e-06 s^3 + 0.0001 s^2 + -0.02 s + 1)"));
        assert!(header.contains("D(s) = 2e-06 s^3 + 0.0001 s^2 + -0.02 s + 2"));
    }

    #[test]
    fn roots_section_prints_conjugate_signs() {
        let poly = Polynomial::new(vec![1.0, 2.0, 5.0]).expect("valid polynomial");
        let roots = crate::roots::root_analysis(&poly, 1e-9);
        let text = format_roots_section(&roots);
        assert!(text.contains("s1 = -1  +  2 j"));
        assert!(text.contains("s2 = -1  -  2 j"));
        assert!(text.contains("Verdict: stable"));
    }
}
