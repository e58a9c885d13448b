//! Budget total and expense ledger mutators.

use crate::dates::parse_iso_date;
use crate::forms::{fields, ExpenseForm};
use crate::model::budget::{BudgetSummary, Expense, ExpenseCategory, ExpenseId};
use crate::model::validation::ValidationError;
use crate::repo::state_repo::StateRepository;
use crate::service::store::{Section, StoreResult, TravelStore};
use crate::text::normalize_line;
use log::info;
use uuid::Uuid;

impl<R: StateRepository> TravelStore<R> {
    /// Overwrites the budget total with a positive amount.
    pub fn set_budget(&mut self, raw_total: &str) -> StoreResult<f64> {
        let Some(total) = parse_positive_amount(raw_total) else {
            return Self::reject("budget_set", ValidationError::InvalidBudgetAmount);
        };
        self.state_mut().budget.total = total;
        self.commit(Section::Budget)?;

        info!("event=budget_set module=store status=ok");
        Ok(total)
    }

    /// Records an expense against a budget that has already been set.
    pub fn add_expense(&mut self, form: &ExpenseForm) -> StoreResult<ExpenseId> {
        if !self.state().budget.is_set() {
            return Self::reject("expense_add", ValidationError::BudgetNotSet);
        }
        let expense = match parse_expense(form) {
            Ok(expense) => expense,
            Err(err) => return Self::reject("expense_add", err),
        };

        let id = expense.id;
        let expenses = &mut self.state_mut().budget.expenses;
        expenses.push(expense);
        let count = expenses.len();
        self.commit(Section::Budget)?;

        info!("event=expense_add module=store status=ok expense_id={id} expenses={count}");
        Ok(id)
    }

    /// Removes an expense. Returns `false` when stale.
    ///
    /// Callers obtain traveler confirmation before calling.
    pub fn delete_expense(&mut self, id: ExpenseId) -> StoreResult<bool> {
        let expenses = &mut self.state_mut().budget.expenses;
        let before = expenses.len();
        expenses.retain(|expense| expense.id != id);
        if expenses.len() == before {
            return Ok(false);
        }
        self.commit(Section::Budget)?;

        info!("event=expense_delete module=store status=ok expense_id={id}");
        Ok(true)
    }

    pub fn budget_summary(&self) -> BudgetSummary {
        self.state().budget.summary()
    }
}

/// Parses a finite, strictly positive amount.
pub fn parse_positive_amount(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value > 0.0)
}

fn parse_expense(form: &ExpenseForm) -> Result<Expense, ValidationError> {
    let description = normalize_line(&form.description);
    if form.date.trim().is_empty() || description.is_empty() {
        return Err(ValidationError::InvalidExpense);
    }
    let Some(amount) = parse_positive_amount(&form.amount) else {
        return Err(ValidationError::InvalidExpense);
    };

    let date = parse_iso_date(fields::EXPENSE_DATE, &form.date)?;
    let category = if form.category.trim().is_empty() {
        ExpenseCategory::Other
    } else {
        ExpenseCategory::parse(&form.category)
            .ok_or_else(|| ValidationError::UnknownExpenseCategory(form.category.trim().to_string()))?
    };

    Ok(Expense {
        id: Uuid::new_v4(),
        date,
        category,
        description,
        amount,
    })
}
