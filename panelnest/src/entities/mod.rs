mod nesting_result;
mod part;
mod placed_part;
mod sheet;

#[doc(inline)]
pub use nesting_result::NestingOutput;
#[doc(inline)]
pub use nesting_result::NestingResult;
#[doc(inline)]
pub use nesting_result::NestingWarning;
#[doc(inline)]
pub use nesting_result::UnplacedPart;
#[doc(inline)]
pub use part::EdgeBanding;
#[doc(inline)]
pub use part::Grain;
#[doc(inline)]
pub use part::PartInstance;
#[doc(inline)]
pub use part::PartSpec;
#[doc(inline)]
pub use placed_part::PlacedPart;
#[doc(inline)]
pub use sheet::SheetSize;
