/*
 * Responsibility
 * - middleware の公開インターフェース
 * - 各 apply(...) は Router を受け取って layer を重ねて返す
 */
pub mod cors;
pub mod http;
pub mod security_headers;
