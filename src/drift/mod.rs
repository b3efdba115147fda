/// Node and edge drift, classifier flags.
pub mod assign;
