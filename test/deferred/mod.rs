
mod test_catch;

// == Combinators ==
mod test_normalize;
mod test_all;
