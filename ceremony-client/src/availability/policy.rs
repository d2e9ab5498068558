use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{Browser, Platform, UserAgent};

/// A dotted version number such as `118.0.5993.70`.
///
/// Versions compare segment by segment as integers, a missing segment counts as `0`. Hence
/// `118.01` equals `118.1.0`.
#[derive(Debug, Clone)]
pub struct Version(Vec<u64>);

impl Version {
    /// The numeric segments as they were written.
    pub fn segments(&self) -> &[u64] {
        &self.0
    }

    fn segment(&self, index: usize) -> u64 {
        self.0.get(index).copied().unwrap_or(0)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.0.len().max(other.0.len());
        (0..len)
            .map(|i| self.segment(i).cmp(&other.segment(i)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut segments = self.0.iter();
        if let Some(first) = segments.next() {
            write!(f, "{first}")?;
        }
        segments.try_for_each(|segment| write!(f, ".{segment}"))
    }
}

/// A version or version requirement could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidVersion(pub String);

impl fmt::Display for InvalidVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` is not a dotted version", self.0)
    }
}

impl std::error::Error for InvalidVersion {}

impl FromStr for Version {
    type Err = InvalidVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .split('.')
            .map(|segment| segment.parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .map(Version)
            .map_err(|_| InvalidVersion(s.to_owned()))
    }
}

/// How a [`VersionRequirement`] compares the actual version against its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `>`
    Greater,
    /// `>=`
    GreaterOrEqual,
    /// `<`
    Less,
    /// `<=`
    LessOrEqual,
    /// `=` or no operator at all
    Equal,
}

impl Comparison {
    fn symbol(self) -> &'static str {
        match self {
            Comparison::Greater => ">",
            Comparison::GreaterOrEqual => ">=",
            Comparison::Less => "<",
            Comparison::LessOrEqual => "<=",
            Comparison::Equal => "=",
        }
    }
}

/// A constraint such as `> 118.01.1322`.
///
/// Serialized as that string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionRequirement {
    /// The comparison operator.
    pub comparison: Comparison,
    /// The threshold on the right hand side.
    pub version: Version,
}

impl VersionRequirement {
    /// Whether `version` satisfies this requirement.
    pub fn matches(&self, version: &Version) -> bool {
        let ordering = version.cmp(&self.version);
        match self.comparison {
            Comparison::Greater => ordering.is_gt(),
            Comparison::GreaterOrEqual => ordering.is_ge(),
            Comparison::Less => ordering.is_lt(),
            Comparison::LessOrEqual => ordering.is_le(),
            Comparison::Equal => ordering.is_eq(),
        }
    }
}

impl FromStr for VersionRequirement {
    type Err = InvalidVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // two character operators first so `>=` is not read as `>`
        let (comparison, rest) = [
            Comparison::GreaterOrEqual,
            Comparison::LessOrEqual,
            Comparison::Greater,
            Comparison::Less,
            Comparison::Equal,
        ]
        .into_iter()
        .find_map(|c| s.strip_prefix(c.symbol()).map(|rest| (c, rest)))
        .unwrap_or((Comparison::Equal, s));

        let version = rest.parse().map_err(|_| InvalidVersion(s.to_owned()))?;
        Ok(Self {
            comparison,
            version,
        })
    }
}

impl TryFrom<String> for VersionRequirement {
    type Error = InvalidVersion;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<VersionRequirement> for String {
    fn from(value: VersionRequirement) -> Self {
        value.to_string()
    }
}

impl fmt::Display for VersionRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.comparison.symbol(), self.version)
    }
}

/// A browser on a platform known to support a feature from some version on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityRule {
    /// The operating system the rule applies to.
    pub platform: Platform,
    /// The browser the rule applies to.
    pub browser: Browser,
    /// The versions of `browser` the rule accepts.
    pub requirement: VersionRequirement,
}

impl CompatibilityRule {
    /// Whether `user_agent` is covered by this rule. A user agent without a readable version is
    /// never covered.
    pub fn matches(&self, user_agent: &UserAgent) -> bool {
        user_agent.platform == self.platform
            && user_agent.browser == self.browser
            && user_agent
                .version
                .as_ref()
                .is_some_and(|version| self.requirement.matches(version))
    }
}

/// The allow-list of user agents on which a resident key login is offered.
///
/// ```json
/// {
///     "rules": [
///         { "platform": "windows", "browser": "chrome", "requirement": "> 118.01.1322" }
///     ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidentKeyPolicy {
    /// A user agent is allowed as soon as one rule matches.
    pub rules: Vec<CompatibilityRule>,
}

impl ResidentKeyPolicy {
    /// Whether any rule covers `user_agent`.
    pub fn allows(&self, user_agent: &UserAgent) -> bool {
        self.rules.iter().any(|rule| rule.matches(user_agent))
    }
}

impl Default for ResidentKeyPolicy {
    /// Chrome on Windows, after version 118.01.1322.
    fn default() -> Self {
        Self {
            rules: vec![CompatibilityRule {
                platform: Platform::Windows,
                browser: Browser::Chrome,
                requirement: VersionRequirement {
                    comparison: Comparison::Greater,
                    version: Version(vec![118, 1, 1322]),
                },
            }],
        }
    }
}
