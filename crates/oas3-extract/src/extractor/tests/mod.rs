mod reference_walker;
mod support;
