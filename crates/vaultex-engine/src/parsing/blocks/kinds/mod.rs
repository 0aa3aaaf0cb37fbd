pub mod callout;
pub mod code_fence;
pub mod equation;
pub mod figure;
pub mod list;
pub mod marker;
pub mod paragraph;
pub mod quote;
pub mod section;
pub mod table;

pub use callout::{Callout, CalloutKind};
pub use code_fence::{CodeBlock, CodeFence, CodeKind, FenceSig};
pub use equation::Equation;
pub use figure::Figure;
pub use list::{List, ListKind};
pub use marker::Marker;
pub use paragraph::Paragraph;
pub use quote::Quote;
pub use section::Section;
pub use table::{CaptionPosition, Table};
