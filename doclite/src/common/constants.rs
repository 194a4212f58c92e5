// doc constants
pub const DOC_ID: &str = "_id";

// update operator constants
pub const SET_OPERATOR: &str = "$set";
pub const INC_OPERATOR: &str = "$inc";
pub const UNSET_OPERATOR: &str = "$unset";
pub const PUSH_OPERATOR: &str = "$push";

// store constants
pub const COLLECTION_CATALOG: &str = "$doclite_catalog";
pub const TAG_MAP_METADATA: &str = "mapNames";
pub const TAG_COLLECTION: &str = "collection";
pub const STORE_INFO: &str = "$doclite_store_info";
pub const NAME_SEPARATOR: &str = "|";

// doclite constants
pub const FIELD_SEPARATOR: char = '.';
pub const INITIAL_SCHEMA_VERSION: u32 = 1;
pub const RESERVED_NAMES: [&str; 4] = [
    COLLECTION_CATALOG,
    STORE_INFO,
    NAME_SEPARATOR,
    DOC_ID,
];

// Compile-time assertion for reserved names count
const _RESERVED_NAMES_CHECK: () = {
    const RESERVED_NAMES_COUNT: usize = 4;
    const ACTUAL_RESERVED_NAMES: usize = RESERVED_NAMES.len();
    const _: [(); 1] = [(); (ACTUAL_RESERVED_NAMES == RESERVED_NAMES_COUNT) as usize];
};

pub const DOCLITE_VERSION: &str = env!("CARGO_PKG_VERSION");
