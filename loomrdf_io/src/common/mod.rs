/*!
Internal, common, code for reader and writer implementations.

*/

// ------------------------------------------------------------------------------------------------
// Modules
// ------------------------------------------------------------------------------------------------

pub(crate) mod indenter;
