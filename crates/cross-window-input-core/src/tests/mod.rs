
mod interpreter_tests;
mod keys_tests;
