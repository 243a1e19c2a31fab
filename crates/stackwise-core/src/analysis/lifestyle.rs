//! Lifestyle Coach
//!
//! Turns journal-only patterns (sleep, exercise, trends) into recommendations.

use crate::config::EngineConfig;
use crate::error::Result;
use crate::models::{Priority, Recommendation, RecommendationType};

use super::context::AnalysisContext;
use super::engine::Analyzer;
use super::pattern::PatternAnalyzer;
use super::types::{LifestylePattern, LifestylePatternType};

/// Scale points above which a pattern is worth more than a footnote
const STRONG_IMPACT: f64 = 2.0;

pub struct LifestyleCoach {
    patterns: PatternAnalyzer,
}

impl Default for LifestyleCoach {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl LifestyleCoach {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            patterns: PatternAnalyzer::new(config),
        }
    }

    fn to_recommendation(&self, pattern: &LifestylePattern) -> Recommendation {
        let metric = pattern.metric.map(|m| m.as_str()).unwrap_or("wellbeing");
        let strong = pattern.impact.abs() >= STRONG_IMPACT;

        let (id, title, advice, priority) = match pattern.pattern_type {
            LifestylePatternType::SleepEnergy | LifestylePatternType::SleepFocus => {
                let (title, advice) = if pattern.impact > 0.0 {
                    (
                        format!("Sleep drives your {}", metric),
                        "Protecting your sleep is likely to pay off more than any supplement.",
                    )
                } else {
                    (
                        format!("Long nights are not helping your {}", metric),
                        "Oversleeping or restless nights may be the cause. Try a consistent wake time.",
                    )
                };
                (
                    format!("lifestyle:{}", pattern.pattern_type.as_str()),
                    title,
                    advice,
                    impact_priority(strong),
                )
            }
            LifestylePatternType::ExerciseMood | LifestylePatternType::ExerciseEnergy => {
                let (title, advice) = if pattern.impact > 0.0 {
                    (
                        format!("Exercise lifts your {}", metric),
                        "Even short sessions on busy days are worth keeping.",
                    )
                } else {
                    (
                        format!("Training days lower your {}", metric),
                        "Consider lighter sessions or more recovery after workouts.",
                    )
                };
                (
                    format!("lifestyle:{}", pattern.pattern_type.as_str()),
                    title,
                    advice,
                    impact_priority(strong),
                )
            }
            LifestylePatternType::MetricTrend => {
                let declining = pattern
                    .metric
                    .is_some_and(|m| !m.is_improvement(pattern.impact));
                if declining {
                    (
                        format!("lifestyle:trend:{}", metric),
                        format!("Your {} is getting worse", metric),
                        "Look at what changed recently: sleep, workload or your stack.",
                        if strong { Priority::High } else { Priority::Medium },
                    )
                } else {
                    (
                        format!("lifestyle:trend:{}", metric),
                        format!("Your {} is improving", metric),
                        "Whatever you changed is working. Keep it up.",
                        Priority::Low,
                    )
                }
            }
            LifestylePatternType::OptimalSleep => (
                "lifestyle:optimal_sleep".to_string(),
                match pattern.optimal_value {
                    Some(hours) => format!("Aim for about {} hours of sleep", hours),
                    None => "Find your sleep sweet spot".to_string(),
                },
                "Try to hit this duration consistently.",
                Priority::Low,
            ),
        };

        Recommendation::new(
            RecommendationType::Lifestyle,
            id,
            priority,
            title,
            format!("{} {}", pattern.description, advice),
        )
        .with_confidence(pattern.confidence)
        .with_data_points(pattern.data_points)
    }
}

fn impact_priority(strong: bool) -> Priority {
    if strong {
        Priority::Medium
    } else {
        Priority::Low
    }
}

impl Analyzer for LifestyleCoach {
    fn id(&self) -> RecommendationType {
        RecommendationType::Lifestyle
    }

    fn name(&self) -> &'static str {
        "Lifestyle Coach"
    }

    fn recommend(&self, ctx: &AnalysisContext) -> Result<Vec<Recommendation>> {
        Ok(self
            .patterns
            .lifestyle_patterns(ctx)
            .iter()
            .map(|p| self.to_recommendation(p))
            .collect())
    }
}
