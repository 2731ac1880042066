mod subset;
pub use subset::SubsetConstruction;

mod epsilon;

mod prune;

mod reverse;

mod prefix;

mod union;

mod normalize;
pub use normalize::Normalized;

mod concatenation;

mod star;

mod completion;
pub use completion::Completion;

mod product;
