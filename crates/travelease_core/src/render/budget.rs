//! Budget section renderer: summary cards, progress bar and expense list.

use crate::dates::format_long_date;
use crate::model::budget::{BudgetSummary, Expense};
use crate::render::{escape_html, format_money, format_percent, BoundAction, Fragment};

/// Summary cards followed by the colored progress bar.
pub fn render_budget_summary(summary: &BudgetSummary) -> Fragment {
    let band = summary.band();
    Fragment::static_markup(format!(
        r#"<div class="budget-summary">
<div class="summary-card"><h4>Total Budget</h4><p id="summaryTotal">{total}</p></div>
<div class="summary-card"><h4>Spent</h4><p id="summarySpent">{spent}</p></div>
<div class="summary-card"><h4>Remaining</h4><p id="summaryRemaining">{remaining}</p></div>
<div class="summary-card"><h4>Used</h4><p id="summaryPercentage">{percentage}</p></div>
</div>
<div class="progress-container">
<div class="progress-bar" id="budgetProgress" style="width: {width:.1}%; background-color: {color};"></div>
</div>
"#,
        total = format_money(summary.total),
        spent = format_money(summary.spent),
        remaining = format_money(summary.remaining),
        percentage = format_percent(summary.percentage_used),
        width = summary.bar_width(),
        color = band.color(),
    ))
}

/// Expense ledger in insertion order with one delete control per row.
pub fn render_expense_list(expenses: &[Expense]) -> Fragment {
    let mut fragment = Fragment::default();
    for expense in expenses {
        let delete_id = format!("delete-expense-{}", expense.id);
        fragment.markup.push_str(&format!(
            r#"<div class="expense-item">
<div class="expense-info">
<div class="expense-date"><strong>{date}</strong></div>
<div class="expense-category-badge">{category}</div>
<div class="expense-description">{description}</div>
<div class="expense-amount">{amount}</div>
</div>
<button class="btn-icon delete-expense" id="{delete_id}" data-id="{id}"><i class="fas fa-trash"></i></button>
</div>
"#,
            date = format_long_date(expense.date),
            category = expense.category.label(),
            description = escape_html(&expense.description),
            amount = format_money(expense.amount),
            id = expense.id,
        ));
        fragment.bind(delete_id, BoundAction::DeleteExpense(expense.id));
    }
    fragment
}

#[cfg(test)]
mod tests {
    use super::{render_budget_summary, render_expense_list};
    use crate::model::budget::{Budget, Expense, ExpenseCategory};
    use crate::render::BoundAction;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn expense(amount: f64) -> Expense {
        Expense {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
            category: ExpenseCategory::Accommodation,
            description: "Hostel & breakfast".to_string(),
            amount,
        }
    }

    #[test]
    fn summary_shows_derived_values_and_band_color() {
        let budget = Budget {
            total: 500.0,
            expenses: vec![expense(100.0), expense(250.0)],
        };
        let markup = render_budget_summary(&budget.summary()).markup;
        assert!(markup.contains(r#"<p id="summarySpent">$350.00</p>"#));
        assert!(markup.contains(r#"<p id="summaryRemaining">$150.00</p>"#));
        assert!(markup.contains(r#"<p id="summaryPercentage">70.0%</p>"#));
        assert!(markup.contains("width: 70.0%; background-color: #28a745;"));
    }

    #[test]
    fn overspent_bar_is_capped_and_red() {
        let budget = Budget {
            total: 100.0,
            expenses: vec![expense(180.0)],
        };
        let markup = render_budget_summary(&budget.summary()).markup;
        assert!(markup.contains("width: 100.0%; background-color: #dc3545;"));
        assert!(markup.contains("180.0%"));
    }

    #[test]
    fn expense_rows_escape_text_and_bind_delete() {
        let entry = expense(42.0);
        let fragment = render_expense_list(std::slice::from_ref(&entry));
        assert!(fragment.markup.contains("Hostel &amp; breakfast"));
        assert!(fragment.markup.contains("June 2, 2024"));
        assert!(fragment.markup.contains("Accommodation"));
        assert_eq!(
            fragment.action_for(&format!("delete-expense-{}", entry.id)),
            Some(&BoundAction::DeleteExpense(entry.id))
        );
    }
}
