//! Posta mail-plan calculator.
//!
//! Each plan is bought per mailbox. A subscription starts at quantity 0 and
//! contributes nothing until a quantity is set.

use crate::catalog::Addon;

/// A billing term for mail plans. Mail plans keep their own multipliers,
/// independent of the CloudEdge price catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostaTerm {
    pub id: &'static str,
    pub name: &'static str,
    pub multiplier: f64,
}

pub const POSTA_TERMS: [PostaTerm; 4] = [
    PostaTerm { id: "monthly", name: "Monthly", multiplier: 1.0 },
    PostaTerm { id: "yearly", name: "Yearly (10% Disc.)", multiplier: 12.0 * 0.9 },
    PostaTerm { id: "3months", name: "3 Months", multiplier: 3.0 },
    PostaTerm { id: "6months", name: "6 Months", multiplier: 6.0 },
];

pub fn find_posta_term(id: &str) -> Option<&'static PostaTerm> {
    POSTA_TERMS.iter().find(|t| t.id == id)
}

/// The term a subscription is billed on; unknown ids bill monthly.
pub fn posta_term_or_default(id: &str) -> &'static PostaTerm {
    find_posta_term(id).unwrap_or(&POSTA_TERMS[0])
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostaPlan {
    pub id: String,
    pub name: String,
    pub base_price_monthly: f64,
    pub features: Vec<String>,
    pub default_addons: Vec<Addon>,
}

fn rules_addon() -> Addon {
    Addon {
        id: "rules".into(),
        name: "Advanced Rules Engine".into(),
        price_monthly: 2.0,
        selected: false,
    }
}

fn plan(id: &str, name: &str, base_price_monthly: f64, features: &[&str]) -> PostaPlan {
    PostaPlan {
        id: id.into(),
        name: name.into(),
        base_price_monthly,
        features: features.iter().map(|f| f.to_string()).collect(),
        default_addons: vec![rules_addon()],
    }
}

/// The four Posta plans, cheapest first.
pub fn builtin_plans() -> Vec<PostaPlan> {
    vec![
        plan("posta-basic", "Posta Basic", 5.0, &[
            "10GB Mailbox",
            "Anti-spam & Anti-virus",
            "Webmail Access",
            "Basic Email Support",
            "Mobile Access (IMAP/POP3)",
            "Custom Domain",
            "Basic Aliases",
        ]),
        plan("posta-standard", "Posta Standard", 10.0, &[
            "25GB Mailbox",
            "Anti-spam & Anti-virus",
            "Shared Calendars & Contacts",
            "Webmail Access",
            "Priority Email Support",
            "Mobile Sync (ActiveSync)",
            "Advanced Aliases",
            "Email Forwarding",
        ]),
        plan("posta-premium", "Posta Premium", 15.0, &[
            "50GB Mailbox",
            "All Standard Features",
            "Email Archiving (1 year)",
            "Advanced Security Suite",
            "Data Loss Prevention (Basic)",
            "Dedicated IP Option",
            "Multiple Domain Hosting",
            "Enhanced Spam Filtering",
        ]),
        plan("posta-enterprise", "Posta Enterprise", 25.0, &[
            "100GB Mailbox",
            "All Premium Features",
            "Compliance Tools (HIPAA, GDPR ready)",
            "Email Archiving (Unlimited)",
            "eDiscovery",
            "SLA Guarantee",
            "24/7 Premium Support",
            "White-labeling Options",
            "API Access",
        ]),
    ]
}

/// One plan line of a quote.
#[derive(Debug, Clone, PartialEq)]
pub struct PostaSubscription {
    pub plan_id: String,
    pub name: String,
    pub base_price_monthly: f64,
    pub features: Vec<String>,
    pub quantity: u32,
    pub term_id: String,
    pub addons: Vec<Addon>,
}

impl PostaSubscription {
    fn from_plan(plan: &PostaPlan) -> Self {
        Self {
            plan_id: plan.id.clone(),
            name: plan.name.clone(),
            base_price_monthly: plan.base_price_monthly,
            features: plan.features.clone(),
            quantity: 0,
            term_id: POSTA_TERMS[0].id.to_string(),
            addons: plan.default_addons.clone(),
        }
    }

    /// Base price plus selected add-ons, per mailbox per month.
    pub fn monthly_price(&self) -> f64 {
        self.base_price_monthly
            + self
                .addons
                .iter()
                .filter(|a| a.selected)
                .map(|a| a.price_monthly)
                .sum::<f64>()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostaSummaryItem {
    pub name: String,
    pub quantity: u32,
    pub billing_cycle: String,
    pub total: f64,
}

/// A quote holding one subscription per plan.
#[derive(Debug, Clone, PartialEq)]
pub struct PostaQuote {
    subscriptions: Vec<PostaSubscription>,
}

impl PostaQuote {
    pub fn new(plans: &[PostaPlan]) -> Self {
        Self {
            subscriptions: plans.iter().map(PostaSubscription::from_plan).collect(),
        }
    }

    pub fn subscriptions(&self) -> &[PostaSubscription] {
        &self.subscriptions
    }

    pub fn subscription(&self, plan_id: &str) -> Option<&PostaSubscription> {
        self.subscriptions.iter().find(|s| s.plan_id == plan_id)
    }

    fn subscription_mut(&mut self, plan_id: &str) -> Option<&mut PostaSubscription> {
        self.subscriptions.iter_mut().find(|s| s.plan_id == plan_id)
    }

    /// Set the mailbox count; negative input reads as 0. False for an unknown plan.
    pub fn set_quantity(&mut self, plan_id: &str, quantity: i64) -> bool {
        match self.subscription_mut(plan_id) {
            Some(sub) => {
                sub.quantity = quantity.clamp(0, i64::from(u32::MAX)) as u32;
                true
            }
            None => false,
        }
    }

    /// Set the billing term. Terms not offered for mail plans are refused.
    pub fn set_term(&mut self, plan_id: &str, term_id: &str) -> bool {
        if find_posta_term(term_id).is_none() {
            return false;
        }
        match self.subscription_mut(plan_id) {
            Some(sub) => {
                sub.term_id = term_id.to_string();
                true
            }
            None => false,
        }
    }

    pub fn set_addon(&mut self, plan_id: &str, addon_id: &str, selected: bool) -> bool {
        let Some(sub) = self.subscription_mut(plan_id) else {
            return false;
        };
        match sub.addons.iter_mut().find(|a| a.id == addon_id) {
            Some(addon) => {
                addon.selected = selected;
                true
            }
            None => false,
        }
    }

    /// Summary lines for every plan with at least one mailbox.
    pub fn summary(&self) -> Vec<PostaSummaryItem> {
        self.subscriptions
            .iter()
            .filter(|s| s.quantity > 0)
            .map(|s| PostaSummaryItem {
                name: s.name.clone(),
                quantity: s.quantity,
                billing_cycle: posta_term_or_default(&s.term_id).name.to_string(),
                total: item_total(s),
            })
            .collect()
    }

    pub fn grand_total(&self) -> f64 {
        self.summary().iter().map(|i| i.total).sum()
    }
}

impl Default for PostaQuote {
    fn default() -> Self {
        Self::new(&builtin_plans())
    }
}

/// `(base + selected add-ons) × quantity × term multiplier`, 0 for no mailboxes.
pub fn item_total(sub: &PostaSubscription) -> f64 {
    if sub.quantity == 0 {
        return 0.0;
    }
    let term = posta_term_or_default(&sub.term_id);
    sub.monthly_price() * f64::from(sub.quantity) * term.multiplier
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_quote_is_empty() {
        let quote = PostaQuote::default();
        assert_eq!(quote.subscriptions().len(), 4);
        assert!(quote.summary().is_empty());
        assert_eq!(quote.grand_total(), 0.0);
    }

    #[test]
    fn negative_quantity_is_zero() {
        let mut quote = PostaQuote::default();
        assert!(quote.set_quantity("posta-basic", -4));
        assert_eq!(quote.subscription("posta-basic").unwrap().quantity, 0);
        assert!(!quote.set_quantity("posta-gold", 1));
    }

    #[test]
    fn three_year_term_is_not_offered() {
        let mut quote = PostaQuote::default();
        assert!(!quote.set_term("posta-basic", "3years"));
        assert!(quote.set_term("posta-basic", "6months"));
    }

    #[test]
    fn standard_yearly_with_rules() {
        let mut quote = PostaQuote::default();
        quote.set_quantity("posta-standard", 3);
        quote.set_term("posta-standard", "yearly");
        quote.set_addon("posta-standard", "rules", true);
        let summary = quote.summary();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].billing_cycle, "Yearly (10% Disc.)");
        assert!((summary[0].total - 388.8).abs() < 1e-9);
    }

    #[test]
    fn unknown_stored_term_bills_monthly() {
        assert_eq!(posta_term_or_default("3years").id, "monthly");
        assert_eq!(find_posta_term("6months").map(|t| t.multiplier), Some(6.0));
    }
}
