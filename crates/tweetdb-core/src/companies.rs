use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Content used by the mock generator to write tweets about one company.
///
/// Phrases may contain `{product}` (replaced with a random topic) and
/// `{company}` (replaced with [`CompanyProfile::name`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub name: String,
    /// Tag names without the leading `#`.
    pub hashtags: Vec<String>,
    pub topics: Vec<String>,
    pub positive_phrases: Vec<String>,
    pub negative_phrases: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompaniesFile {
    pub companies: Vec<CompanyProfile>,
}

/// Load and validate company profiles from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_companies(path: &Path) -> Result<Vec<CompanyProfile>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CompaniesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: CompaniesFile =
        serde_yaml::from_str(&content).map_err(ConfigError::CompaniesFileParse)?;

    validate_companies(&file.companies)?;

    Ok(file.companies)
}

/// Check that a profile list is usable by the generator.
///
/// # Errors
///
/// Returns [`ConfigError::Validation`] describing the first problem found.
pub fn validate_companies(companies: &[CompanyProfile]) -> Result<(), ConfigError> {
    if companies.is_empty() {
        return Err(ConfigError::Validation(
            "at least one company must be configured".to_string(),
        ));
    }

    let mut seen_names = HashSet::new();

    for company in companies {
        if company.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "company name must be non-empty".to_string(),
            ));
        }

        if !seen_names.insert(company.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate company name: '{}'",
                company.name
            )));
        }

        let lists = [
            ("hashtags", &company.hashtags),
            ("topics", &company.topics),
            ("positive_phrases", &company.positive_phrases),
            ("negative_phrases", &company.negative_phrases),
        ];
        for (list_name, list) in lists {
            if list.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "company '{}' has no {list_name}",
                    company.name
                )));
            }
        }
    }

    Ok(())
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// The three companies the generator writes about when no profile file is
/// configured.
#[must_use]
pub fn builtin_companies() -> Vec<CompanyProfile> {
    vec![
        CompanyProfile {
            name: "Apple Inc.".to_string(),
            hashtags: owned(&[
                "Apple",
                "iPhone",
                "MacBook",
                "iOS",
                "iPad",
                "AirPods",
                "AppleWatch",
            ]),
            topics: owned(&[
                "iPhone 14",
                "iOS 16",
                "MacBook Pro",
                "Apple Watch",
                "AirPods",
            ]),
            positive_phrases: owned(&[
                "love my new {product}",
                "amazing experience with {product}",
                "best {product} ever",
                "{product} is incredible",
                "impressed with the {product}",
                "customer service is top notch",
                "worth every penny",
                "can't believe how good {product} is",
                "exceeded my expectations",
                "game changer",
            ]),
            negative_phrases: owned(&[
                "disappointed with {product}",
                "terrible experience with {product}",
                "{product} keeps crashing",
                "overpriced for what you get",
                "customer service was unhelpful",
                "wouldn't recommend {product}",
                "waste of money",
                "having issues with my {product}",
                "expected better from {company}",
                "going back to the competition",
            ]),
        },
        CompanyProfile {
            name: "Tesla, Inc.".to_string(),
            hashtags: owned(&[
                "Tesla",
                "ElonMusk",
                "EV",
                "ModelY",
                "ModelS",
                "ModelX",
                "Model3",
                "Cybertruck",
                "FSD",
            ]),
            topics: owned(&[
                "Model Y",
                "Full Self-Driving",
                "Elon Musk",
                "Cybertruck",
                "Supercharger",
            ]),
            positive_phrases: owned(&[
                "love my new {product}",
                "autopilot is amazing",
                "best car I've ever owned",
                "supercharger network is fantastic",
                "software update improved everything",
                "acceleration is mind-blowing",
                "saving so much on gas",
                "best decision I ever made",
                "the future of driving",
                "zero emissions and loving it",
            ]),
            negative_phrases: owned(&[
                "service center delays are frustrating",
                "quality control issues with my {product}",
                "FSD still not fully working",
                "panel gaps on my new {product}",
                "waiting too long for repairs",
                "range anxiety is real",
                "autopilot disengaged unexpectedly",
                "price increases are ridiculous",
                "delivery was delayed again",
                "software update broke features",
            ]),
        },
        CompanyProfile {
            name: "Microsoft".to_string(),
            hashtags: owned(&[
                "Microsoft",
                "Windows11",
                "Office365",
                "Teams",
                "Xbox",
                "Azure",
                "Surface",
            ]),
            topics: owned(&[
                "Windows 11",
                "Microsoft Teams",
                "Xbox",
                "Office 365",
                "Azure",
            ]),
            positive_phrases: owned(&[
                "Windows 11 is a great improvement",
                "Teams has transformed our workflow",
                "Xbox Game Pass is the best value in gaming",
                "Office 365 makes collaboration so easy",
                "Azure services are rock solid",
                "Surface laptop is beautifully designed",
                "PowerBI has changed how we use data",
                "Microsoft's accessibility features are industry-leading",
                "seamless integration between services",
                "Microsoft has really turned things around",
            ]),
            negative_phrases: owned(&[
                "Windows 11 update broke my computer",
                "Teams keeps crashing during meetings",
                "too many bugs in the latest release",
                "customer support couldn't solve my issue",
                "forced updates are so annoying",
                "subscription model is too expensive",
                "OneDrive sync issues are frustrating",
                "Windows search is still terrible",
                "too many service outages lately",
                "privacy concerns with data collection",
            ]),
        },
    ]
}
