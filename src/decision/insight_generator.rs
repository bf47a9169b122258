// ==========================================
// Rework Tracker - Insight Generator
// ==========================================
// Responsibility: ordered trigger rules → bounded list of sentences
// Rules are evaluated in declaration order; the first `max_insights`
// that fire are kept, so identical input always yields the same subset
// ==========================================

use crate::config::PipelineConfig;
use crate::decision::models::{Insight, InsightLevel};
use crate::engine::{percent_change, Trend};
use crate::i18n;

// ==========================================
// InsightContext - what a rule may look at
// ==========================================
pub struct InsightContext<'a, M> {
    pub current: &'a M,
    pub prior: Option<&'a M>,
    pub config: &'a PipelineConfig,
}

impl<M> InsightContext<'_, M> {
    /// Localized template with `%{name}` placeholders filled
    pub fn message(&self, key: &str, args: &[(&str, String)]) -> String {
        i18n::t_in(&self.config.locale, key, args)
    }

    /// Trend of one metric against the prior window
    pub fn trend(&self, metric: impl Fn(&M) -> f64) -> Trend {
        percent_change(metric(self.current), self.prior.map(&metric))
    }

    /// Rose by more than the configured alert threshold
    pub fn trend_alert(&self, metric: impl Fn(&M) -> f64) -> Option<f64> {
        let trend = self.trend(metric);
        if trend.is_rise_above(self.config.trend_alert_pct) {
            trend.pct()
        } else {
            None
        }
    }
}

pub type RuleOutcome = Option<(InsightLevel, String)>;

// ==========================================
// InsightRule
// ==========================================
pub struct InsightRule<M> {
    pub id: &'static str,
    pub eval: fn(&InsightContext<'_, M>) -> RuleOutcome,
}

impl<M> InsightRule<M> {
    pub const fn new(id: &'static str, eval: fn(&InsightContext<'_, M>) -> RuleOutcome) -> Self {
        Self { id, eval }
    }
}

// ==========================================
// InsightGenerator
// ==========================================
pub struct InsightGenerator {
    max_insights: usize,
}

impl InsightGenerator {
    pub fn new(max_insights: usize) -> Self {
        Self { max_insights }
    }

    pub fn generate<M>(&self, rules: &[InsightRule<M>], ctx: &InsightContext<'_, M>) -> Vec<Insight> {
        rules
            .iter()
            .filter_map(|rule| {
                (rule.eval)(ctx).map(|(level, message)| Insight::new(rule.id, level, message))
            })
            .take(self.max_insights)
            .collect()
    }
}

// ==========================================
// Number formatting for templates
// ==========================================

/// Integer with thousands separators: 12345 → "12,345"
pub fn fmt_count(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    if value < 0 {
        format!("-{}", out)
    } else {
        out
    }
}

/// One decimal with thousands separators: 1234.56 → "1,234.6"
pub fn fmt_decimal(value: f64) -> String {
    let rounded = format!("{:.1}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), "0"));
    let int_value: i64 = int_part.parse().unwrap_or(0);
    let sign = if value < 0.0 && rounded != "0.0" { "-" } else { "" };
    format!("{}{}.{}", sign, fmt_count(int_value), frac_part)
}
