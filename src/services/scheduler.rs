// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use std::path::{Path, PathBuf};

use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime, Timelike};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::domain::{AuthorIdentity, CommitResult, Persona, ScheduledCommit};
use crate::error::{Error, Result};
use crate::services::clock::{Clock, SystemClock};
use crate::services::git::GitService;

const NIGHT_HOURS: [u32; 5] = [23, 0, 1, 2, 3];
const WEEKEND_HOURS: std::ops::Range<u32> = 10..18;

/// Pick the timestamp `persona` would plausibly have committed at.
///
/// `WeekendWarrior` always lands on a Saturday strictly after `now`, even if
/// `now` is already a weekend day. `NightOwl` lands in 23:00–03:59 and is
/// never earlier than `now`.
pub fn resolve_timestamp<R: Rng + ?Sized>(
    persona: Persona,
    now: NaiveDateTime,
    rng: &mut R,
) -> NaiveDateTime {
    match persona {
        Persona::Standard => now.with_nanosecond(0).unwrap_or(now),
        Persona::WeekendWarrior => {
            let weekday = i64::from(now.weekday().num_days_from_monday());
            let mut days_ahead = 5 - weekday;
            if days_ahead <= 0 {
                days_ahead += 7;
            }
            let hour = rng.gen_range(WEEKEND_HOURS);
            let minute = rng.gen_range(0..60);
            at(now.date() + Duration::days(days_ahead), hour, minute)
        }
        Persona::NightOwl => {
            let hour = *NIGHT_HOURS.choose(rng).unwrap_or(&NIGHT_HOURS[0]);
            let minute = rng.gen_range(0..60);
            let tonight = at(now.date(), hour, minute);
            // Daytime "now" pushes early-morning hours to tomorrow; a slot
            // already behind us tonight does the same.
            if tonight > now {
                tonight
            } else {
                tonight + Duration::days(1)
            }
        }
    }
}

fn at(date: chrono::NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);
    date.and_time(time)
}

/// Commits files under a persona-chosen timestamp.
///
/// Staging and committing are not atomic against other writers of the same
/// work tree; callers serialize access per repository.
pub struct CommitScheduler<C: Clock = SystemClock> {
    git: GitService,
    clock: C,
    rng: StdRng,
}

impl CommitScheduler<SystemClock> {
    pub fn open(repo_path: &Path, seed: Option<u64>) -> Result<Self> {
        let git = GitService::open(repo_path)?;
        Ok(Self::with_clock(git, SystemClock, seed))
    }
}

impl<C: Clock> CommitScheduler<C> {
    pub fn with_clock(git: GitService, clock: C, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { git, clock, rng }
    }

    pub fn git(&self) -> &GitService {
        &self.git
    }

    pub fn resolve(&mut self, persona: Persona) -> NaiveDateTime {
        let now = self.clock.now();
        let ts = resolve_timestamp(persona, now, &mut self.rng);
        debug!(%persona, %now, resolved = %ts, "timestamp resolved");
        ts
    }

    /// Validate inputs and fix the timestamp without touching the repository.
    pub fn plan(
        &mut self,
        message: &str,
        files: &[PathBuf],
        persona: Persona,
        author: &AuthorIdentity,
    ) -> Result<ScheduledCommit> {
        if message.trim().is_empty() {
            return Err(Error::InvalidCommitMessage("message is empty".into()));
        }
        if files.is_empty() {
            return Err(Error::NothingToCommit);
        }
        if author.name.trim().is_empty() || author.email.trim().is_empty() {
            return Err(Error::Config("author name and email must be set".into()));
        }

        Ok(ScheduledCommit {
            message: message.to_string(),
            files: files.to_vec(),
            persona,
            author: author.clone(),
            timestamp: self.resolve(persona),
        })
    }

    /// Stage the planned files and write the commit with both dates forced.
    pub fn apply(&self, plan: &ScheduledCommit) -> Result<CommitResult> {
        self.git.check_state()?;
        let staged = self.git.stage(&plan.files)?;
        let date = plan.git_date();
        let commit_hash = self.git.commit_dated(&plan.message, &plan.author, &date)?;

        info!(
            commit = %commit_hash,
            persona = %plan.persona,
            date = %date,
            files = staged.len(),
            "commit written"
        );

        Ok(CommitResult {
            commit_hash,
            timestamp_used: plan.timestamp,
            persona: plan.persona,
        })
    }

    pub fn commit_with_timestamp(
        &mut self,
        message: &str,
        files: &[PathBuf],
        persona: Persona,
        author: &AuthorIdentity,
    ) -> Result<CommitResult> {
        let plan = self.plan(message, files, persona, author)?;
        self.apply(&plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn weekend_from_saturday_skips_a_week() {
        // 2024-03-09 is a Saturday
        let mut rng = StdRng::seed_from_u64(7);
        let out = resolve_timestamp(Persona::WeekendWarrior, ts(2024, 3, 9, 9, 0, 0), &mut rng);
        assert_eq!(out.date(), NaiveDate::from_ymd_opt(2024, 3, 16).unwrap());
    }

    #[test]
    fn weekend_from_sunday_goes_to_next_saturday() {
        let mut rng = StdRng::seed_from_u64(7);
        let out = resolve_timestamp(Persona::WeekendWarrior, ts(2024, 3, 10, 20, 0, 0), &mut rng);
        assert_eq!(out.date(), NaiveDate::from_ymd_opt(2024, 3, 16).unwrap());
    }

    #[test]
    fn weekend_from_friday_is_tomorrow() {
        let mut rng = StdRng::seed_from_u64(7);
        let out = resolve_timestamp(Persona::WeekendWarrior, ts(2024, 3, 8, 23, 59, 59), &mut rng);
        assert_eq!(out.date(), NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        assert!((10..18).contains(&out.hour()));
        assert_eq!(out.second(), 0);
    }

    #[test]
    fn standard_drops_subseconds() {
        let now = ts(2024, 3, 6, 14, 30, 15) + Duration::milliseconds(250);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            resolve_timestamp(Persona::Standard, now, &mut rng),
            ts(2024, 3, 6, 14, 30, 15)
        );
    }
}
