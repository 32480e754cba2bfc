pub mod current_user;
pub mod validated_json;

pub use current_user::AuthUser;
pub use validated_json::{Validate, ValidatedJson};
