mod common;
mod sanitize;
mod validation;
