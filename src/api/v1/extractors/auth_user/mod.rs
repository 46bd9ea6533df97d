/*!
 * Authenticated caller extractor
 *
 * Responsibility:
 * - token gate が request extensions に載せた Claims を handler に渡す
 */

mod core;

pub use self::core::AuthUser;
