use crate::settings::TimerSettings;

pub const DEFAULT_WORK_MINS: u32 = 25;
pub const DEFAULT_BREAK_MINS: u32 = 5;

/// Resolved timer configuration
#[derive(Clone, Debug, PartialEq)]
pub struct TimerConfig {
    pub work_mins: u32,
    pub break_mins: u32,
    pub seed: Option<u64>,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_mins: DEFAULT_WORK_MINS,
            break_mins: DEFAULT_BREAK_MINS,
            seed: None,
        }
    }
}

impl TimerConfig {
    /// Layer command line values over the settings file over the defaults
    pub fn resolve(
        work: Option<&str>,
        brk: Option<&str>,
        seed: Option<u64>,
        file: &TimerSettings,
    ) -> Self {
        Self {
            work_mins: work
                .map(parse_minutes)
                .or(file.work_mins)
                .unwrap_or(DEFAULT_WORK_MINS),
            break_mins: brk
                .map(parse_minutes)
                .or(file.break_mins)
                .unwrap_or(DEFAULT_BREAK_MINS),
            seed: seed.or(file.seed),
        }
    }

    pub fn duration_secs(&self, phase: Phase) -> u64 {
        let mins = match phase {
            Phase::Work => self.work_mins,
            Phase::Break => self.break_mins,
        };
        u64::from(mins) * 60
    }
}

/// Parse a minute count the way C's `atoi` does: optional leading
/// whitespace and sign, then as many digits as follow. Anything that does
/// not start with a number is 0, and negatives clamp to 0.
pub fn parse_minutes(raw: &str) -> u32 {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: u32 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value.saturating_mul(10).saturating_add(u32::from(b - b'0'));
    }

    if negative {
        0
    } else {
        value
    }
}

/// Timer phases, alternating forever
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Work,
    Break,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Work => "WORK",
            Phase::Break => "BREAK",
        }
    }

    /// The tree grows during work and retracts during a break
    pub fn growing(&self) -> bool {
        matches!(self, Phase::Work)
    }

    pub fn next(&self) -> Phase {
        match self {
            Phase::Work => Phase::Break,
            Phase::Break => Phase::Work,
        }
    }
}
