/// City used when a start request does not name one.
pub const DEFAULT_CITY_ID: &str = "1";

/// Timezone used to derive local dates when none is configured.
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Prefix of the ledger label written when a session is settled.
pub const SETTLEMENT_LABEL_PREFIX: &str = "Parking";

/// Label of the ledger entry recording an account's opening balance.
pub const OPENING_BALANCE_LABEL: &str = "Opening balance";

/// Environment variable overriding the default city id.
pub const ENV_DEFAULT_CITY_ID: &str = "PK_DEFAULT_CITY_ID";

/// Environment variable overriding the fallback timezone.
pub const ENV_DEFAULT_TIMEZONE: &str = "PK_DEFAULT_TIMEZONE";

/// Environment variable overriding the settlement label prefix.
pub const ENV_LEDGER_LABEL_PREFIX: &str = "PK_LEDGER_LABEL_PREFIX";
