pub mod dynamodb;
pub mod lambda;
