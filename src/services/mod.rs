pub mod chatbot;
pub mod predictor;
