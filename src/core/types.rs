/*!
 * Core Types
 * Common types used across the manager
 */

use super::errors::ManagerError;
use super::limits::INIT_PROCESS;
use serde::{Deserialize, Serialize};
use smartstring::alias::String as SmartString;
use std::fmt;

/// Resource unit count
pub type Units = u32;

/// Identity of a process or resource
///
/// Keeps the spelling it was created with for display; comparisons that
/// matter to the manager go through [`Name::key`], which is case-folded.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Name(SmartString);

/// Process identity
pub type Pid = Name;

/// Resource identity
pub type Rid = Name;

impl Name {
    #[inline]
    pub fn new(s: &str) -> Self {
        Self(SmartString::from(s))
    }

    #[inline(always)]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Case-folded lookup key
    pub fn key(&self) -> SmartString {
        fold(self.as_str())
    }

    /// Case-insensitive comparison against a raw identity
    #[inline]
    pub fn matches(&self, other: &str) -> bool {
        self.key() == fold(other)
    }

    /// Whether this names the protected init process
    #[inline]
    pub fn is_init(&self) -> bool {
        self.matches(INIT_PROCESS)
    }
}

/// Case-fold a raw identity into its lookup key
pub(crate) fn fold(s: &str) -> SmartString {
    s.chars().flat_map(char::to_lowercase).collect()
}

impl From<&str> for Name {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Name {
    fn from(s: String) -> Self {
        Self(SmartString::from(s))
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Process priority
///
/// Ordered so that a derived comparison matches scheduling precedence:
/// `Init < User < System`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Reserved for the init process
    Init = 0,
    User = 1,
    System = 2,
}

impl Priority {
    /// All levels, lowest first
    pub const ALL: [Priority; 3] = [Priority::Init, Priority::User, Priority::System];

    /// Ready-list index of this level
    #[inline(always)]
    pub const fn level(self) -> usize {
        self as usize
    }

    /// Levels in scheduling order, highest first
    pub fn descending() -> impl Iterator<Item = Priority> {
        Self::ALL.into_iter().rev()
    }
}

impl TryFrom<i64> for Priority {
    type Error = ManagerError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Priority::Init),
            1 => Ok(Priority::User),
            2 => Ok(Priority::System),
            other => Err(ManagerError::InvalidPriority(other)),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level())
    }
}

/// Process status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessStatus {
    Running,
    Ready,
    Blocked,
}

impl ProcessStatus {
    /// Numeric code used on the command line (RUNNING=0, READY=1, BLOCKED=2)
    #[inline]
    pub const fn code(self) -> u8 {
        match self {
            ProcessStatus::Running => 0,
            ProcessStatus::Ready => 1,
            ProcessStatus::Blocked => 2,
        }
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Init < Priority::User);
        assert!(Priority::User < Priority::System);

        let order: Vec<_> = Priority::descending().collect();
        assert_eq!(order, vec![Priority::System, Priority::User, Priority::Init]);
    }

    #[test]
    fn test_priority_from_number() {
        assert_eq!(Priority::try_from(0i64).unwrap(), Priority::Init);
        assert_eq!(Priority::try_from(2i64).unwrap(), Priority::System);
        assert_eq!(
            Priority::try_from(3i64).unwrap_err(),
            ManagerError::InvalidPriority(3)
        );
        assert!(Priority::try_from(-1i64).is_err());
    }

    #[test]
    fn test_name_is_case_insensitive() {
        let name = Name::from("Proc1");
        assert!(name.matches("proc1"));
        assert!(name.matches("PROC1"));
        assert_eq!(name.key().as_str(), "proc1");
        assert_eq!(name.to_string(), "Proc1");
        assert!(Name::from("INIT").is_init());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ProcessStatus::Running.code(), 0);
        assert_eq!(ProcessStatus::Ready.code(), 1);
        assert_eq!(ProcessStatus::Blocked.code(), 2);
    }
}
