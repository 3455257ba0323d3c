pub mod explain;
pub mod prompts;
pub mod report;
pub mod roi;
pub mod templates;

pub use explain::{
    explain_insight, explain_predictions, explain_summary_stats, explain_trend,
    format_column_name, generate_overall_summary, InsightExplanation, PredictionExplanation,
    TrendExplanation,
};
pub use prompts::{
    prompt_by_id, prompts_in, PromptCard, PromptCategory, PromptError, PROMPT_CARDS,
};
pub use report::{export_report_csv, render_text_report};
pub use roi::{compute_roi_scenarios, RoiAssumptions, RoiScenario, RoiScenarioInput, ScenarioLabel};
pub use templates::{
    format_sample_preview, generate_template_csv, template_meta, TemplateError, TemplateKind,
    TemplateMeta, DATA_REQUIREMENTS,
};
