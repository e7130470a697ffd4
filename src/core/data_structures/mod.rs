/*!
 * Data Structures
 *
 * Small value types shared by the allocator and the shell:
 * - Program names stored inline for short identifiers
 */

mod program_name;

pub use program_name::ProgramName;
