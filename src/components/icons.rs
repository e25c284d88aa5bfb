//! Centralized icon definitions.
//!
//! Maps semantic icon names to lucide icons.

use icondata::Icon;

pub const SEARCH: Icon = icondata::LuSearch;
pub const PLUS: Icon = icondata::LuPlus;
pub const EDIT: Icon = icondata::LuPencil;
pub const DELETE: Icon = icondata::LuTrash2;
pub const UPLOAD: Icon = icondata::LuUpload;
pub const MAIL: Icon = icondata::LuMail;
pub const VERIFIED: Icon = icondata::LuShieldCheck;
pub const CLOSE: Icon = icondata::LuX;
pub const BACK: Icon = icondata::LuArrowLeft;
pub const LOCATION: Icon = icondata::LuMapPin;
pub const CALENDAR: Icon = icondata::LuCalendar;
