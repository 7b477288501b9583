//! 会話の参加者（役割・説明・システムメッセージ・コンテキスト予算）

use crate::domain::ContextBudget;

pub const SALES: &str = "SalesAgent";
pub const SUPPORT: &str = "SupportAgent";
pub const OPS: &str = "OpsAgent";
/// 最終成果物を出す役割
pub const COORDINATOR: &str = "CoordinatorAgent";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentProfile {
    pub name: String,
    pub description: String,
    pub system_message: String,
    pub budget: ContextBudget,
}

impl AgentProfile {
    fn new(name: &str, description: &str, system_message: &str, budget: ContextBudget) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            system_message: system_message.to_string(),
            budget,
        }
    }
}

const COORDINATOR_SYSTEM_MESSAGE: &str = concat!(
    "You are the CoordinatorAgent responsible for generating **exactly 4 distinct strategic insights** ",
    "based only on the latest summaries from the Sales, Support, and Operations agents. ",
    "Do not repeat similar points across insights. Do not generate multiple insight groups. ",
    "Each insight must be unique and focus on a different high-level issue or opportunity. ",
    "Each insight must begin with a bolded section title (e.g., **Customer Experience**, **Sales Strategy**), ",
    "followed by 2–3 concise, action-oriented sentences in a consistent tone. ",
    "Only generate one block of four insights. Do not respond again unless explicitly prompted. ",
    "Use only the specific content provided by the sales/support/ops agents. Do not generate general advice. ",
    "Reference the actual events or metrics mentioned in the summaries. ",
    "When writing insights, do NOT use the word 'agent' to refer to people. Instead, use terms like 'sales team', 'support staff', or 'operations team'. ",
    "- Use **real figures, metrics, or events** mentioned in the summaries (e.g., Sales in the US increased by 20%, Delivery SLA improved from 78% to 91%, CRM glitches delayed follow-ups by 24 hours). ",
    "- DO NOT suggest 'conducting analysis' or 'implementing a system' unless it is in direct response to a described issue in the summaries. ",
    "- Focus on interpreting what already happened and deriving concrete insights from those events. ",
    "- Avoid repeating vague actions like improve communication or gather feedback unless those already appeared in the summaries."
);

/// 発言順（Sales → Support → Ops → Coordinator）の既定メンバー
pub fn default_roster() -> Vec<AgentProfile> {
    vec![
        AgentProfile::new(
            SALES,
            "Analyzes sales reports.",
            "Summarize the sales report in 3–5 bullet points focused on performance and issues.",
            ContextBudget::domain_default(),
        ),
        AgentProfile::new(
            SUPPORT,
            "Analyzes support tickets and feedback.",
            "Summarize the support report in 3–5 points focused on customer issues and resolutions.",
            ContextBudget::domain_default(),
        ),
        AgentProfile::new(
            OPS,
            "Analyzes operational issues.",
            "Summarize the operations report in 3–5 points focused on efficiency and delays.",
            ContextBudget::domain_default(),
        ),
        AgentProfile::new(
            COORDINATOR,
            "Combines insights into 5 unique business insights.",
            COORDINATOR_SYSTEM_MESSAGE,
            ContextBudget::coordinator_default(),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster_order_and_budgets() {
        let r = default_roster();
        let names: Vec<&str> = r.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec![SALES, SUPPORT, OPS, COORDINATOR]);
        assert_eq!(r[0].budget.max_tokens, 100);
        assert_eq!(r[3].budget.max_tokens, 400);
        assert!(r[3].system_message.contains("exactly 4 distinct strategic insights"));
    }
}
