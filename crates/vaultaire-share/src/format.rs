//! Wire and link format constants.

/// Base58 alphabet (Bitcoin ordering, no `0`, `O`, `I` or `l`).
pub const BASE58_ALPHABET: &[u8; 58] =
    b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Payload version byte: content is the phrase's UTF-8 bytes.
pub const VERSION_RAW: u8 = 0x01;

/// Payload version byte: content is raw DEFLATE of the phrase's UTF-8 bytes.
pub const VERSION_DEFLATE: u8 = 0x02;

/// Canonical web host for share links.
pub const DEFAULT_WEB_HOST: &str = "vaultaire.app";

/// Custom URL scheme registered by the app.
pub const DEFAULT_APP_SCHEME: &str = "vaultaire";

/// Host label used by custom-scheme links (`vaultaire://s#...`).
pub const DEFAULT_APP_HOST: &str = "s";

/// Path of the share route on the web host.
pub const DEFAULT_SHARE_PATH: &str = "/s";

/// Legacy query parameter carrying the token when fragments are stripped.
pub const DEFAULT_QUERY_PARAM: &str = "p";

/// Maximum inflated size of a DEFLATE payload (1 MiB).
pub const MAX_INFLATED_LEN: usize = 1 << 20;
