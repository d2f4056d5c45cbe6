mod manifest;
mod utils;
mod validator;
