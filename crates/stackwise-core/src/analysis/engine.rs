//! Recommendation Service - orchestrates the analyzers for one context

use chrono::Utc;

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::models::{Priority, Recommendation, RecommendationType};

use super::context::AnalysisContext;
use super::dosage::DosageAdvisor;
use super::lifestyle::LifestyleCoach;
use super::pattern::PatternAnalyzer;
use super::synergy::SynergyChecker;
use super::timing::TimingOptimizer;
use super::types::{AnalysisPeriod, AnalysisResult, ReadinessStatus};
use super::warnings::InteractionWarner;

/// Trait for recommendation analyzers
pub trait Analyzer: Send + Sync {
    /// Recommendation type this analyzer produces
    fn id(&self) -> RecommendationType;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Safety-critical analyzers fail the whole call instead of being skipped
    fn is_safety_critical(&self) -> bool {
        false
    }

    /// Analyze the context and produce recommendations
    fn recommend(&self, ctx: &AnalysisContext) -> Result<Vec<Recommendation>>;
}

/// Entry point for recommendations over one user's snapshot
///
/// Analyzers run in registration order; the built-in order is Warnings,
/// Synergy, Timing, Dosage, Lifestyle. The merged list is stably sorted by
/// priority, so ties keep that order.
pub struct RecommendationService {
    ctx: AnalysisContext,
    config: EngineConfig,
    analyzers: Vec<Box<dyn Analyzer>>,
}

impl RecommendationService {
    /// Create a service with default thresholds
    pub fn new(ctx: AnalysisContext) -> Self {
        Self::with_config(ctx, EngineConfig::default())
    }

    /// Create a service with the built-in analyzers
    pub fn with_config(ctx: AnalysisContext, config: EngineConfig) -> Self {
        let analyzers: Vec<Box<dyn Analyzer>> = vec![
            Box::new(InteractionWarner::new(&config)),
            Box::new(SynergyChecker::new()),
            Box::new(TimingOptimizer::new(&config)),
            Box::new(DosageAdvisor::new()),
            Box::new(LifestyleCoach::new(&config)),
        ];
        Self::with_analyzers(ctx, config, analyzers)
    }

    /// Create a service with an explicit analyzer list
    pub fn with_analyzers(
        ctx: AnalysisContext,
        config: EngineConfig,
        analyzers: Vec<Box<dyn Analyzer>>,
    ) -> Self {
        Self {
            ctx,
            config,
            analyzers,
        }
    }

    /// Register an additional analyzer (runs after the existing ones)
    pub fn register(&mut self, analyzer: Box<dyn Analyzer>) {
        self.analyzers.push(analyzer);
    }

    pub fn context(&self) -> &AnalysisContext {
        &self.ctx
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Registered analyzer types, in run order
    pub fn analyzer_types(&self) -> Vec<RecommendationType> {
        self.analyzers.iter().map(|a| a.id()).collect()
    }

    /// Run every analyzer and merge the results, highest priority first.
    ///
    /// An advisory analyzer that fails is logged and skipped. A safety-critical
    /// one fails the call with [`Error::CriticalAnalyzer`].
    pub fn generate_all(&self) -> Result<Vec<Recommendation>> {
        let mut all = Vec::new();

        for analyzer in &self.analyzers {
            match analyzer.recommend(&self.ctx) {
                Ok(recommendations) => {
                    tracing::debug!(
                        analyzer = analyzer.id().as_str(),
                        count = recommendations.len(),
                        "Analyzer complete"
                    );
                    all.extend(recommendations);
                }
                Err(e) if analyzer.is_safety_critical() => {
                    tracing::error!(
                        analyzer = analyzer.id().as_str(),
                        error = %e,
                        "Safety-critical analyzer failed"
                    );
                    return Err(Error::CriticalAnalyzer {
                        analyzer: analyzer.name().to_string(),
                        message: e.to_string(),
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        analyzer = analyzer.id().as_str(),
                        error = %e,
                        "Analyzer failed, skipping"
                    );
                }
            }
        }

        // Stable: equal priorities keep analyzer order
        all.sort_by(|a, b| b.priority.cmp(&a.priority));

        tracing::info!(
            user = self.ctx.user_id.as_deref().unwrap_or("-"),
            count = all.len(),
            "Recommendations generated"
        );
        Ok(all)
    }

    /// The `n` most important recommendations
    pub fn get_top(&self, n: usize) -> Result<Vec<Recommendation>> {
        let mut all = self.generate_all()?;
        all.truncate(n);
        Ok(all)
    }

    pub fn get_by_type(
        &self,
        recommendation_type: RecommendationType,
    ) -> Result<Vec<Recommendation>> {
        Ok(self
            .generate_all()?
            .into_iter()
            .filter(|r| r.recommendation_type == recommendation_type)
            .collect())
    }

    /// Every derived artifact, independent of the recommendation merge
    pub fn perform_full_analysis(&self) -> Result<AnalysisResult> {
        let patterns = PatternAnalyzer::new(&self.config);
        let synergy = SynergyChecker::new();
        let warner = InteractionWarner::new(&self.config);

        let warnings = warner
            .warnings(&self.ctx)
            .map_err(|e| Error::CriticalAnalyzer {
                analyzer: "Interaction Warner".to_string(),
                message: e.to_string(),
            })?;

        let dosage = DosageAdvisor::new()
            .analyses(&self.ctx)
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Dosage analysis failed, skipping");
                Vec::new()
            });

        let period = self
            .ctx
            .journal_period()
            .map(|(start, end)| AnalysisPeriod {
                start,
                end,
                days: self.ctx.journal.len(),
            });

        Ok(AnalysisResult {
            user_id: self.ctx.user_id.clone(),
            analyzed_at: Utc::now(),
            period,
            correlations: patterns.supplement_correlations(&self.ctx),
            timing: patterns.timing_analyses(&self.ctx),
            dosage,
            synergies: synergy.find_synergies(&self.ctx),
            missing_partners: synergy.find_missing_synergy_partners(&self.ctx),
            lifestyle_patterns: patterns.lifestyle_patterns(&self.ctx),
            warnings,
        })
    }

    /// Readiness gate: enough journal days first, then enough check-ins
    pub fn has_enough_data(&self) -> ReadinessStatus {
        let journal_days = self.ctx.journal.len();
        let check_ins = self.ctx.check_ins.len();
        let min_days = self.config.readiness.min_journal_days;
        let min_check_ins = self.config.readiness.min_check_ins;

        let (ready, recommendation) = if journal_days < min_days {
            let missing = min_days - journal_days;
            (
                false,
                format!(
                    "Keep journaling: {} more {} needed before recommendations are personalized.",
                    missing,
                    plural(missing, "day", "days")
                ),
            )
        } else if check_ins < min_check_ins {
            let missing = min_check_ins - check_ins;
            (
                false,
                format!(
                    "Keep checking in: {} more {} needed before recommendations are personalized.",
                    missing,
                    plural(missing, "check-in", "check-ins")
                ),
            )
        } else {
            (
                true,
                "Enough data collected for personalized recommendations.".to_string(),
            )
        };

        ReadinessStatus {
            ready,
            journal_days,
            check_ins,
            recommendation,
        }
    }

    /// One sentence for a chat surface
    pub fn generate_chat_summary(&self) -> Result<String> {
        let readiness = self.has_enough_data();
        if !readiness.ready {
            return Ok(readiness.recommendation);
        }

        let recommendations = self.generate_all()?;
        let summary = recommendations
            .iter()
            .find(|r| r.priority >= Priority::High)
            .or_else(|| recommendations.first())
            .map(|r| r.message.clone())
            .unwrap_or_else(|| {
                "Your stack looks good. No changes recommended right now.".to_string()
            });
        Ok(summary)
    }
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeSlot;
    use crate::test_utils::{check_in, flat_journal, item, stack_context};

    struct FailingAnalyzer {
        critical: bool,
    }

    impl Analyzer for FailingAnalyzer {
        fn id(&self) -> RecommendationType {
            RecommendationType::Warning
        }

        fn name(&self) -> &'static str {
            "Failing"
        }

        fn is_safety_critical(&self) -> bool {
            self.critical
        }

        fn recommend(&self, _ctx: &AnalysisContext) -> Result<Vec<Recommendation>> {
            Err(Error::Analyzer {
                analyzer: self.name().to_string(),
                message: "boom".to_string(),
            })
        }
    }

    struct FixedAnalyzer(Vec<(&'static str, Priority)>);

    impl Analyzer for FixedAnalyzer {
        fn id(&self) -> RecommendationType {
            RecommendationType::Lifestyle
        }

        fn name(&self) -> &'static str {
            "Fixed"
        }

        fn recommend(&self, _ctx: &AnalysisContext) -> Result<Vec<Recommendation>> {
            Ok(self
                .0
                .iter()
                .map(|(id, priority)| {
                    Recommendation::new(RecommendationType::Lifestyle, *id, *priority, *id, *id)
                })
                .collect())
        }
    }

    fn ready_context() -> AnalysisContext {
        let journal = (0..7).map(|n| flat_journal(n, 6.0)).collect();
        let check_ins = (0..14)
            .map(|n| check_in("creatine", n % 7, TimeSlot::Morning))
            .collect();
        AnalysisContext::new(journal, check_ins, vec![])
    }

    #[test]
    fn test_builtin_analyzer_order() {
        let service = RecommendationService::new(AnalysisContext::default());
        assert_eq!(
            service.analyzer_types(),
            vec![
                RecommendationType::Warning,
                RecommendationType::Synergy,
                RecommendationType::Timing,
                RecommendationType::Dosage,
                RecommendationType::Lifestyle,
            ]
        );
    }

    #[test]
    fn test_empty_context_yields_nothing() {
        let service = RecommendationService::new(AnalysisContext::default());
        assert!(service.generate_all().unwrap().is_empty());
    }

    #[test]
    fn test_sort_is_stable_within_priority() {
        let analyzers: Vec<Box<dyn Analyzer>> = vec![
            Box::new(FixedAnalyzer(vec![
                ("a", Priority::Low),
                ("b", Priority::High),
            ])),
            Box::new(FixedAnalyzer(vec![
                ("c", Priority::Critical),
                ("d", Priority::High),
                ("e", Priority::Low),
                ("f", Priority::Medium),
            ])),
        ];
        let service = RecommendationService::with_analyzers(
            AnalysisContext::default(),
            EngineConfig::default(),
            analyzers,
        );
        let ids: Vec<String> = service
            .generate_all()
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["c", "b", "d", "f", "a", "e"]);

        let top: Vec<String> = service.get_top(2).unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(top, vec!["c", "b"]);
    }

    #[test]
    fn test_one_of_each_priority_sorts_descending() {
        let service = RecommendationService::with_analyzers(
            AnalysisContext::default(),
            EngineConfig::default(),
            vec![Box::new(FixedAnalyzer(vec![
                ("low", Priority::Low),
                ("high", Priority::High),
                ("critical", Priority::Critical),
                ("medium", Priority::Medium),
            ]))],
        );
        let priorities: Vec<Priority> = service
            .generate_all()
            .unwrap()
            .into_iter()
            .map(|r| r.priority)
            .collect();
        assert_eq!(
            priorities,
            vec![Priority::Critical, Priority::High, Priority::Medium, Priority::Low]
        );
    }

    #[test]
    fn test_advisory_failure_is_skipped() {
        let mut service = RecommendationService::with_analyzers(
            AnalysisContext::default(),
            EngineConfig::default(),
            vec![Box::new(FailingAnalyzer { critical: false })],
        );
        service.register(Box::new(FixedAnalyzer(vec![("ok", Priority::Medium)])));

        let recs = service.generate_all().unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].id, "ok");
    }

    #[test]
    fn test_critical_failure_fails_the_call() {
        let service = RecommendationService::with_analyzers(
            AnalysisContext::default(),
            EngineConfig::default(),
            vec![
                Box::new(FixedAnalyzer(vec![("ok", Priority::Medium)])),
                Box::new(FailingAnalyzer { critical: true }),
            ],
        );

        let err = service.generate_all().unwrap_err();
        assert!(err.is_critical());
        assert!(service.generate_chat_summary().is_ok());
    }

    #[test]
    fn test_get_by_type() {
        let ctx = stack_context(vec![
            item("zinc"),
            item("iron"),
            item("caffeine").with_time(TimeSlot::Bedtime),
        ]);
        let service = RecommendationService::new(ctx);

        let warnings = service.get_by_type(RecommendationType::Warning).unwrap();
        assert!(!warnings.is_empty());
        assert!(warnings
            .iter()
            .all(|r| r.recommendation_type == RecommendationType::Warning));
    }

    #[test]
    fn test_readiness_messages() {
        let service = RecommendationService::new(AnalysisContext::new(
            (0..6).map(|n| flat_journal(n, 6.0)).collect(),
            vec![],
            vec![],
        ));
        let status = service.has_enough_data();
        assert!(!status.ready);
        assert!(status.recommendation.contains("1 more day "));

        let status = RecommendationService::new(ready_context()).has_enough_data();
        assert!(status.ready);
        assert_eq!(status.journal_days, 7);
        assert_eq!(status.check_ins, 14);
    }

    #[test]
    fn test_chat_summary_not_ready() {
        let service = RecommendationService::new(AnalysisContext::default());
        let summary = service.generate_chat_summary().unwrap();
        assert!(summary.contains("7 more days"));
    }

    #[test]
    fn test_chat_summary_prefers_urgent() {
        let mut ctx = ready_context();
        ctx.stack = crate::analysis::Stack::new(vec![
            item("vitamin-d").with_dosage("2000 IU").with_time(TimeSlot::Morning),
            item("caffeine").with_time(TimeSlot::Bedtime),
        ]);
        let summary = RecommendationService::new(ctx).generate_chat_summary().unwrap();
        assert!(summary.starts_with("Caffeine in the evening"));
    }

    #[test]
    fn test_chat_summary_all_good() {
        let summary = RecommendationService::new(ready_context())
            .generate_chat_summary()
            .unwrap();
        assert!(summary.contains("looks good"));
    }

    #[test]
    fn test_full_analysis_bundle() {
        let mut ctx = ready_context().with_user("user-1");
        ctx.stack = crate::analysis::Stack::new(vec![item("zinc"), item("iron")]);
        let result = RecommendationService::new(ctx).perform_full_analysis().unwrap();

        assert_eq!(result.user_id.as_deref(), Some("user-1"));
        assert_eq!(result.period.unwrap().days, 7);
        assert_eq!(result.synergies.len(), 1);
        assert_eq!(result.dosage.len(), 2);
        assert_eq!(result.missing_partners.len(), 2);
    }
}
