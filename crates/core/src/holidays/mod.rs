//! Holiday calendar module - dates on which parking is not billed.

mod holidays_model;
mod holidays_service;
mod holidays_traits;


pub use holidays_model::{Holiday, HolidayCalendar};
pub use holidays_service::HolidayService;
pub use holidays_traits::{HolidayRepositoryTrait, HolidayServiceTrait};
