// KERNEL ASSERTION ERROR
// ================================================================================================

pub const ERR_TX_OUTPUT_NOTES_OVERFLOW: u32 = 131072;
pub const ERR_INVALID_NOTE_TYPE: u32 = 131073;
pub const ERR_NOTE_INVALID_TYPE_FOR_TAG: u32 = 131074;
pub const ERR_NOTE_TAG_MUST_BE_U32: u32 = 131075;
pub const ERR_INVALID_NOTE_IDX: u32 = 131076;
pub const ERR_ASSET_MALFORMED: u32 = 131077;
pub const ERR_NOTE_FUNGIBLE_MAX_AMOUNT_EXCEEDED: u32 = 131078;
pub const ERR_NON_FUNGIBLE_ASSET_ALREADY_EXISTS: u32 = 131079;
pub const ERR_NOTE_TOO_MANY_ASSETS: u32 = 131080;
pub const ERR_INVALID_TX_EXPIRATION_DELTA: u32 = 131081;

pub const KERNEL_ERRORS: [(u32, &str); 10] = [
    (ERR_TX_OUTPUT_NOTES_OVERFLOW, "Output notes exceeded the maximum limit of 1024"),
    (ERR_INVALID_NOTE_TYPE, "Invalid note type"),
    (ERR_NOTE_INVALID_TYPE_FOR_TAG, "Provided note type is invalid for the tag prefix"),
    (ERR_NOTE_TAG_MUST_BE_U32, "The note's tag high bits must be set to 0"),
    (ERR_INVALID_NOTE_IDX, "Invalid note index"),
    (ERR_ASSET_MALFORMED, "Provided asset word is not a well formed asset"),
    (ERR_NOTE_FUNGIBLE_MAX_AMOUNT_EXCEEDED, "Adding a fungible asset to a note cannot exceed the maximum amount"),
    (ERR_NON_FUNGIBLE_ASSET_ALREADY_EXISTS, "Non-fungible asset that already exists in the note cannot be added again"),
    (ERR_NOTE_TOO_MANY_ASSETS, "Number of note assets exceeded the maximum limit of 256"),
    (ERR_INVALID_TX_EXPIRATION_DELTA, "Invalid transaction expiration block delta was set"),
];
