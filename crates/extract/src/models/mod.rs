mod category;
mod field;
mod label;
mod record;

pub use self::category::Category;
pub use self::field::Field;
pub use self::label::LabelIndex;
pub use self::record::{Coordinate, MapRecord};
