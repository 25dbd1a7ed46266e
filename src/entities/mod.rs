pub mod budgets;
pub mod donations;
pub mod expenses;
pub mod financial_reports;
pub mod members;
pub mod offering_types;
pub mod pledges;
pub mod users;

pub use budgets as budget_entity;
pub use donations as donation_entity;
pub use expenses as expense_entity;
pub use financial_reports as financial_report_entity;
pub use members as member_entity;
pub use offering_types as offering_type_entity;
pub use pledges as pledge_entity;
pub use users as user_entity;

pub use donations::{DonationType, PaymentMethod};
pub use expenses::ExpenseStatus;
pub use financial_reports::ReportType;
pub use members::{Gender, MaritalStatus};
pub use pledges::PledgeStatus;
pub use users::UserRole;
