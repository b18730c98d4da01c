/*
 * Responsibility
 * - field-by-field conversion between request/response DTOs and repo rows
 * - no I/O: hashing and role assignment happen before a mapper is called
 *
 * Notes
 * - optional fields are carried through as Option; a missing patch field never
 *   overwrites a stored value
 */
pub mod bands;
pub mod colors;
pub mod comments;
pub mod members;
pub mod mentions;
