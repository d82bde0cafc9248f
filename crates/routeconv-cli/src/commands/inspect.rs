use anyhow::Result;
use colored::Colorize;
use routeconv::{classify_segment, tokenize, Capture, Part, Pattern, Suffix};

use crate::config::Config;

fn describe_capture(capture: &Capture) -> String {
    let mut text = format!("{} as {}", capture.regex, capture.placeholder());
    if capture.has_reject() {
        text.push_str(&format!(" unless {}", capture.reject));
    }
    text
}

fn describe_part(part: &Part) -> String {
    match part {
        Part::Literal { value } => format!("{} {:?}", "literal".cyan(), value),
        Part::Capture(capture) => format!("{} {}", "capture".yellow(), describe_capture(capture)),
    }
}

fn describe_suffix(suffix: &Suffix) -> String {
    match suffix {
        Suffix::Wildcard(capture) => format!("wildcard {}", describe_capture(capture)),
        fixed => format!("{:?}", fixed.literal().unwrap_or_default()),
    }
}

/// Prints tokens, classified parts, suffix and regexes for each pattern
///
/// Returns `false` when any pattern fails to compile.
pub fn execute(patterns: &[String], config: &Config) -> Result<bool> {
    let registry = config.registry();
    let mut success = true;

    for raw in patterns {
        println!("{}", raw.bold());

        for segment in tokenize(raw) {
            match classify_segment(&segment, &registry) {
                Ok(classified) => println!(
                    "  {:<14} {:<24} {}",
                    format!("{:?}", classified.kind),
                    format!("{:?}", segment),
                    describe_part(&classified.part)
                ),
                Err(e) => println!("  {:<14} {:<24} {}", "-", format!("{:?}", segment), e.to_string().red()),
            }
        }

        match Pattern::compile_with(raw.as_str(), raw.as_str(), &registry) {
            Ok(pattern) => {
                println!("  suffix:  {}", describe_suffix(pattern.suffix()));
                for (regex, name) in pattern.regexes() {
                    println!("  regex:   {} {:?}", regex, name);
                }
            }
            Err(e) => {
                eprintln!("{} {}: {}", "ERROR:".red().bold(), raw, e);
                success = false;
            }
        }
        println!();
    }

    Ok(success)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_describe_capture_with_reject() {
        let capture = Capture::new("[^/]+", "resource").with_reject("users|groups");
        assert_eq!(describe_capture(&capture), "[^/]+ as RESOURCE unless users|groups");
    }

    #[test]
    fn test_describe_suffix() {
        assert_eq!(describe_suffix(&Suffix::OptionalSlash), "\"/?\"");
        assert_eq!(describe_suffix(&Suffix::wildcard()), "wildcard .* as SUFFIX");
    }
}
