mod error;
mod run;
mod settings;
