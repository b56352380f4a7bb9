// handlers/mod.rs
//
// Public:    GET /, GET /health, GET /posts
// Protected: POST /posts, PUT /posts, DELETE /posts (AuthUser extractor)
pub mod posts;
pub mod system;
