//! Curated starter prompts for the AI assistant, grouped by topic.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("unknown prompt category '{0}' (expected financial, predictions, analytics or compare)")]
    UnknownCategory(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptCategory {
    Financial,
    Predictions,
    Analytics,
    Compare,
}

impl PromptCategory {
    pub const ALL: [PromptCategory; 4] = [
        Self::Financial,
        Self::Predictions,
        Self::Analytics,
        Self::Compare,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Financial => "financial",
            Self::Predictions => "predictions",
            Self::Analytics => "analytics",
            Self::Compare => "compare",
        }
    }

    /// Heading shown above the category's cards.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Financial => "Financial Planning",
            Self::Predictions => "Forecasting",
            Self::Analytics => "Analytics",
            Self::Compare => "Comparisons",
        }
    }
}

impl fmt::Display for PromptCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromptCategory {
    type Err = PromptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "financial" => Ok(Self::Financial),
            "predictions" | "forecasting" => Ok(Self::Predictions),
            "analytics" => Ok(Self::Analytics),
            "compare" | "comparisons" => Ok(Self::Compare),
            _ => Err(PromptError::UnknownCategory(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PromptCard {
    pub id: &'static str,
    pub category: PromptCategory,
    pub title: &'static str,
    pub description: &'static str,
    /// Text sent to the assistant when the card is picked.
    pub prompt: &'static str,
}

pub const PROMPT_CARDS: &[PromptCard] = &[
    PromptCard {
        id: "cash-flow",
        category: PromptCategory::Financial,
        title: "Cash Flow Analysis",
        description: "Understand your cash flow patterns and improve liquidity",
        prompt: "Analyze my cash flow patterns. When do I have the most money coming in vs going out? Help me identify any cash flow issues and suggest ways to improve my working capital.",
    },
    PromptCard {
        id: "budget-planning",
        category: PromptCategory::Financial,
        title: "Budget Planning",
        description: "Create and optimize your business budget",
        prompt: "Help me create a practical budget for my business. Show me where I am spending the most money and suggest areas where I could cut costs without hurting sales.",
    },
    PromptCard {
        id: "profit-margins",
        category: PromptCategory::Financial,
        title: "Profit Margin Optimization",
        description: "Find ways to increase your profit margins",
        prompt: "Analyze my profit margins. Which products or services are most profitable? Where can I increase prices or reduce costs to improve my bottom line?",
    },
    PromptCard {
        id: "expense-tracking",
        category: PromptCategory::Financial,
        title: "Expense Management",
        description: "Track and optimize your business expenses",
        prompt: "Break down my expenses by category. Which costs are growing fastest? Help me identify unnecessary expenses and suggest ways to reduce spending.",
    },
    PromptCard {
        id: "revenue-forecast",
        category: PromptCategory::Predictions,
        title: "Revenue Forecasting",
        description: "Predict future revenue based on trends",
        prompt: "Based on my sales history, what revenue should I expect next month and next quarter? What factors might affect these predictions?",
    },
    PromptCard {
        id: "seasonal-trends",
        category: PromptCategory::Predictions,
        title: "Seasonal Trends",
        description: "Identify seasonal patterns in your business",
        prompt: "What seasonal patterns exist in my business? When are my peak and slow periods? How should I prepare for these changes?",
    },
    PromptCard {
        id: "inventory-forecast",
        category: PromptCategory::Predictions,
        title: "Inventory Planning",
        description: "Forecast inventory needs to avoid stockouts",
        prompt: "Based on my sales trends, how much inventory should I order? When should I reorder to avoid running out of stock?",
    },
    PromptCard {
        id: "growth-projection",
        category: PromptCategory::Predictions,
        title: "Growth Projections",
        description: "Project business growth trajectories",
        prompt: "If I maintain my current growth rate, where will my business be in 6 months? What growth rate should I aim for to reach my goals?",
    },
    PromptCard {
        id: "customer-insights",
        category: PromptCategory::Analytics,
        title: "Customer Insights",
        description: "Understand your customer behavior",
        prompt: "Who are my best customers? What do they buy and how often? How can I attract more customers like them?",
    },
    PromptCard {
        id: "product-performance",
        category: PromptCategory::Analytics,
        title: "Product Performance",
        description: "Analyze which products drive success",
        prompt: "Which products or services are my top performers? Which ones are underperforming? Should I focus more on certain offerings?",
    },
    PromptCard {
        id: "marketing-roi",
        category: PromptCategory::Analytics,
        title: "Marketing ROI",
        description: "Measure marketing effectiveness",
        prompt: "Which marketing channels bring in the most customers and revenue? Where should I increase my marketing spend for the best return?",
    },
    PromptCard {
        id: "kpi-dashboard",
        category: PromptCategory::Analytics,
        title: "Key Performance Indicators",
        description: "Track your most important metrics",
        prompt: "What are the most important numbers I should track in my business? Show me my key performance indicators and how they are trending.",
    },
    PromptCard {
        id: "period-comparison",
        category: PromptCategory::Compare,
        title: "Period Comparison",
        description: "Compare performance across time periods",
        prompt: "Compare this month to last month. What has improved? What has declined? What should I focus on to maintain or improve performance?",
    },
    PromptCard {
        id: "product-comparison",
        category: PromptCategory::Compare,
        title: "Product Comparison",
        description: "Compare different products or services",
        prompt: "Compare the performance of my different products or services. Which should I promote more? Which should I consider discontinuing?",
    },
    PromptCard {
        id: "channel-comparison",
        category: PromptCategory::Compare,
        title: "Sales Channel Comparison",
        description: "Compare different sales or marketing channels",
        prompt: "Compare my different sales or marketing channels. Which ones are most cost-effective? Where should I invest more resources?",
    },
    PromptCard {
        id: "benchmark",
        category: PromptCategory::Compare,
        title: "Goal Tracking",
        description: "Track progress against your goals",
        prompt: "How am I tracking against my goals? Am I on pace to hit my targets? What adjustments should I make to stay on track?",
    },
];

#[must_use]
pub fn prompt_by_id(id: &str) -> Option<&'static PromptCard> {
    PROMPT_CARDS.iter().find(|card| card.id == id)
}

pub fn prompts_in(category: PromptCategory) -> impl Iterator<Item = &'static PromptCard> {
    PROMPT_CARDS
        .iter()
        .filter(move |card| card.category == category)
}
