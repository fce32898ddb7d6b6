//! # Feature: Command Cooldown
//!
//! Limits guarded commands to one invocation per (guild, user) pair per
//! fixed time window. Uses DashMap for thread-safe concurrent access so
//! overlapping invocations by different users never interfere.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Initial release with per-(guild, user) fixed-window cooldown

use dashmap::DashMap;
use std::fmt;
use std::time::{Duration, Instant};

/// Composite key for cooldowns: (guild_id, user_id).
/// Direct messages use guild_id 0 so DM usage shares one bucket.
type CooldownKey = (u64, u64);

/// Rejection returned while a (guild, user) pair is still cooling down.
///
/// Carries the remaining wait rounded to the nearest whole second, which
/// is what gets surfaced to the invoking user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandOnCooldown {
    pub remaining_secs: u64,
}

impl fmt::Display for CommandOnCooldown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "command is on cooldown for {}s", self.remaining_secs)
    }
}

impl std::error::Error for CommandOnCooldown {}

/// Keyed cooldown store: (guild, user) -> next-eligible instant.
///
/// Entries are never cleaned up; a stale entry is always in the past and
/// gets overwritten on the next successful acquire.
#[derive(Clone)]
pub struct CooldownGuard {
    entries: DashMap<CooldownKey, Instant>,
    window: Duration,
}

impl CooldownGuard {
    pub fn new(window: Duration) -> Self {
        CooldownGuard {
            entries: DashMap::new(),
            window,
        }
    }

    /// Attempt to run the guarded command for this (guild, user) pair.
    ///
    /// Succeeds and arms the cooldown when the pair is eligible; otherwise
    /// returns the remaining wait. The DashMap entry API holds the shard
    /// lock across the read-modify-write, so per-key updates are atomic.
    pub fn try_acquire(&self, guild_id: u64, user_id: u64) -> Result<(), CommandOnCooldown> {
        let now = Instant::now();
        let mut entry = self.entries.entry((guild_id, user_id)).or_insert(now);

        if now < *entry {
            let remaining = *entry - now;
            return Err(CommandOnCooldown {
                remaining_secs: remaining.as_secs_f64().round() as u64,
            });
        }

        *entry = now + self.window;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[test]
    fn test_first_acquire_succeeds() {
        let guard = CooldownGuard::new(Duration::from_secs(60));
        assert!(guard.try_acquire(1, 1).is_ok());
    }

    #[test]
    fn test_second_acquire_rejected_with_remaining() {
        let guard = CooldownGuard::new(Duration::from_secs(60));
        assert!(guard.try_acquire(1, 1).is_ok());

        let rejection = guard.try_acquire(1, 1).unwrap_err();
        assert!(rejection.remaining_secs > 0);
        assert!(rejection.remaining_secs <= 60);
    }

    #[tokio::test]
    async fn test_acquire_succeeds_after_window() {
        let guard = CooldownGuard::new(Duration::from_millis(100));
        assert!(guard.try_acquire(1, 1).is_ok());
        assert!(guard.try_acquire(1, 1).is_err());

        sleep(Duration::from_millis(150)).await;
        assert!(guard.try_acquire(1, 1).is_ok());
    }

    #[test]
    fn test_keys_are_independent_per_user() {
        let guard = CooldownGuard::new(Duration::from_secs(60));
        assert!(guard.try_acquire(1, 1).is_ok());
        assert!(guard.try_acquire(1, 2).is_ok());
        assert!(guard.try_acquire(1, 1).is_err());
        assert!(guard.try_acquire(1, 2).is_err());
    }

    #[test]
    fn test_keys_are_independent_per_guild() {
        // The same user in two guilds has two separate cooldowns
        let guard = CooldownGuard::new(Duration::from_secs(60));
        assert!(guard.try_acquire(1, 1).is_ok());
        assert!(guard.try_acquire(2, 1).is_ok());
        assert!(guard.try_acquire(1, 1).is_err());
        assert!(guard.try_acquire(2, 1).is_err());
    }

    #[test]
    fn test_rejection_display() {
        let rejection = CommandOnCooldown { remaining_secs: 42 };
        assert_eq!(rejection.to_string(), "command is on cooldown for 42s");
    }
}
