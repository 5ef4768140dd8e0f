//! Synthetic realname verification records.
//!
//! Everything random is drawn from the caller's RNG, and "now" is passed in, so a seeded RNG
//! reproduces the same fixture set. Identity numbers look plausible (region code, birth date,
//! sequence, check character) but the check character is random, so they never pass checksum
//! validation and must not be treated as real.

use crate::api::models::certification::{RealnameVerification, VerificationStatus};
use crate::config::FixturesConfig;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::Rng;
use rand::prelude::RngExt;

const SURNAMES: &[&str] = &[
    "Zhang", "Wang", "Li", "Zhao", "Liu", "Chen", "Yang", "Huang", "Zhou", "Wu", "Xu", "Sun", "Ma", "Zhu", "Hu", "Guo",
];

const GIVEN_NAMES: &[&str] = &[
    "Wei", "Fang", "Na", "Min", "Jing", "Lei", "Qiang", "Jun", "Yang", "Yong", "Yan", "Jie", "Tao", "Ming", "Chao",
    "Xiu Ying", "Gui Lan", "Zhi Qiang", "Hai Yan", "Jian Hua",
];

/// Administrative region codes used as the identity number prefix.
const REGION_CODES: &[&str] = &[
    "110101", "110105", "120103", "310104", "320102", "330106", "370102", "420106", "440103", "440305", "500103",
    "510104",
];

const CHECK_CHARACTERS: &[u8] = b"0123456789X";

const BIRTH_YEARS: std::ops::RangeInclusive<i32> = 1960..=2000;

const REJECT_REASONS: &[&str] = &[
    "Identity card photo is blurry",
    "Face photo does not match the identity card",
    "Identity card has expired",
    "Name does not match the identity card",
    "Back of the identity card is missing",
    "Photo shows signs of editing",
];

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, table: &[&'a str]) -> &'a str {
    table[rng.random_range(0..table.len())]
}

/// `<surname> <given name>`.
pub fn full_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{} {}", pick(rng, SURNAMES), pick(rng, GIVEN_NAMES))
}

/// An 18 character identity number: 6-digit region, `YYYYMMDD` birth date in 1960..=2000,
/// 3-digit sequence and a check character from `0123456789X`.
///
/// The prefix is deliberately a real 6-digit region code rather than a random 5-digit one, so
/// numbers have the usual 18 character length.
pub fn id_card<R: Rng + ?Sized>(rng: &mut R) -> String {
    let region = pick(rng, REGION_CODES);

    let year = rng.random_range(BIRTH_YEARS);
    let day_of_year = rng.random_range(1..=365);
    let birth_date = NaiveDate::from_yo_opt(year, day_of_year)
        .map(|date| date.format("%Y%m%d").to_string())
        .unwrap_or_else(|| format!("{year}0101"));

    let sequence = rng.random_range(0..1000);
    let check = char::from(CHECK_CHARACTERS[rng.random_range(0..CHECK_CHARACTERS.len())]);

    format!("{region}{birth_date}{sequence:03}{check}")
}

/// A timestamp somewhere in `window` before `now`.
pub fn recent_time<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>, window: std::time::Duration) -> DateTime<Utc> {
    let window_secs = i64::try_from(window.as_secs()).unwrap_or(i64::MAX).max(1);
    now - Duration::seconds(rng.random_range(0..window_secs))
}

/// Generate `config.realname_count` records with ids `1..=count`.
///
/// Image URLs for record `i` (0-based) use `random=3i+1`, `3i+2`, `3i+3` so every record gets
/// distinct placeholder images. Only rejected records carry a reject reason.
pub fn realname_records<R: Rng + ?Sized>(
    rng: &mut R,
    config: &FixturesConfig,
    now: DateTime<Utc>,
) -> Vec<RealnameVerification> {
    let image = |n: usize| format!("{}?random={}", config.image_base_url, n);

    (0..config.realname_count)
        .map(|i| {
            let status = VerificationStatus::ALL[rng.random_range(0..VerificationStatus::ALL.len())];
            let create_time = recent_time(rng, now, config.recent_window);
            let reject_reason = match status {
                VerificationStatus::Rejected => Some(pick(rng, REJECT_REASONS).to_string()),
                _ => None,
            };

            RealnameVerification {
                id: i as i64 + 1,
                name: full_name(rng),
                id_card: id_card(rng),
                status,
                create_time,
                front_image: image(i * 3 + 1),
                back_image: image(i * 3 + 2),
                face_image: image(i * 3 + 3),
                reject_reason,
            }
        })
        .collect()
}
