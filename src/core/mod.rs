pub mod corpus;
pub mod distribution;
pub mod markov;
pub mod pipeline;
