pub mod config;
pub mod engine;
pub mod error;
pub mod patterns;
pub mod registry;
pub mod report;

pub use config::ExtractorConfig;
pub use engine::Extractor;
pub use error::{ExtractError, MatcherFault, RegistryError};
pub use patterns::{Category, Match, PatternMatcher};
pub use registry::{builtin_registry, Registry};
pub use report::ExtractionReport;

/// Demonstration text containing at least one token of every category.
pub const SAMPLE_TEXT: &str = "
Contact us at support@company.com or sales@subdomain.example.org
Visit our website: https://www.example.com or https://subdomain.example.org/page
Call us at (123) 456-7890 or 123-456-7890 or 123.456.7890
Payment options: 1234 5678 9012 3456 or 1234-5678-9012-3456
Meeting times: 14:30 today or 2:30 PM tomorrow
HTML content: <div class=\"container\"><p>Hello World</p></div>
Follow us: #TechTips #WebDevelopment #CodingLife
Prices start at $19.99 and go up to $1,234.56
";

/// Extract every built-in category from `text` using the shared registry.
pub fn extract_all(text: &str) -> Result<ExtractionReport, RegistryError> {
    Ok(Extractor::new()?.extract_all(text))
}
