/// Application-wide constants to avoid magic values throughout the codebase.
///
/// API endpoints, column names, display labels and defaults live here so the
/// fetcher, transformer and renderers agree on them.
/// Output format constants
pub mod output_formats {
    /// Text output format - colorful summary with headline figures
    pub const TEXT: &str = "text";
    /// JSON output format - transformed tables for automation
    pub const JSON: &str = "json";
    /// Minimal output format - plain text without colors or emojis
    pub const MINIMAL: &str = "minimal";

    /// Default output format
    pub const DEFAULT: &str = TEXT;

    /// All valid output formats
    pub const ALL: [&str; 3] = [TEXT, JSON, MINIMAL];
}

/// GA4 Data API and OAuth2 endpoints
pub mod api {
    /// Root of the GA4 Data API
    pub const DEFAULT_BASE_URL: &str = "https://analyticsdata.googleapis.com";
    /// API version path segment
    pub const VERSION: &str = "v1beta";
    /// OAuth2 scope required by runReport
    pub const ANALYTICS_READONLY_SCOPE: &str =
        "https://www.googleapis.com/auth/analytics.readonly";
    /// Token endpoint used when the key file does not name one
    pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
    /// Grant type for the service account JWT bearer flow
    pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
    /// Lifetime of the signed assertion in seconds
    pub const ASSERTION_LIFETIME_SECONDS: i64 = 3600;
}

/// Environment variables consulted for secrets
pub mod env_vars {
    /// Inline service account key JSON
    pub const CREDENTIALS_JSON: &str = "GA4_CREDENTIALS_JSON";
    /// Ready-made bearer token
    pub const ACCESS_TOKEN: &str = "GA4_ACCESS_TOKEN";
    /// Standard Google key file location
    pub const GOOGLE_APPLICATION_CREDENTIALS: &str = "GOOGLE_APPLICATION_CREDENTIALS";
}

/// Timeout and duration constants
pub mod timeouts {
    /// Default per-request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
    /// Maximum accepted timeout in seconds (1 hour)
    pub const MAX_TIMEOUT_SECONDS: u64 = 3600;
    /// Minimum timeout in seconds
    pub const MIN_TIMEOUT_SECONDS: u64 = 1;
}

/// Default configuration values
pub mod defaults {
    /// Dashboard title name when none is configured
    pub const DISPLAY_NAME: &str = "Analytics";
    /// Where the HTML dashboard is written
    pub const HTML_DASHBOARD_PATH: &str = "ga4-dashboard.html";
    /// Config file name searched in the working directory and its parents
    pub const CONFIG_FILE_NAME: &str = ".ga4-dashboard.toml";
}

/// Raw GA4 dimension names
pub mod dimensions {
    pub const DATE: &str = "date";
    pub const SESSION_SOURCE: &str = "sessionSource";
    pub const SESSION_MEDIUM: &str = "sessionMedium";
    pub const PAGE_TITLE: &str = "pageTitle";
    pub const PAGE_PATH: &str = "pagePath";
    pub const EVENT_NAME: &str = "eventName";
    pub const DEVICE_CATEGORY: &str = "deviceCategory";
}

/// Raw GA4 metric names
pub mod metrics {
    pub const ACTIVE_USERS: &str = "activeUsers";
    pub const NEW_USERS: &str = "newUsers";
    pub const SESSIONS: &str = "sessions";
    pub const ENGAGED_SESSIONS: &str = "engagedSessions";
    pub const ENGAGEMENT_RATE: &str = "engagementRate";
    pub const BOUNCE_RATE: &str = "bounceRate";
    pub const AVERAGE_SESSION_DURATION: &str = "averageSessionDuration";
    pub const SCREEN_PAGE_VIEWS_PER_SESSION: &str = "screenPageViewsPerSession";
    pub const EVENT_COUNT: &str = "eventCount";
    pub const USER_ENGAGEMENT_DURATION: &str = "userEngagementDuration";
    pub const SCREEN_PAGE_VIEWS: &str = "screenPageViews";
    pub const TOTAL_USERS: &str = "totalUsers";
}

/// Localized display column names
pub mod columns {
    pub const USUARIOS_ACTIVOS: &str = "usuariosActivos";
    pub const USUARIOS_NUEVOS: &str = "usuariosNuevos";
    pub const SESIONES: &str = "sesiones";
    pub const SESIONES_COMPROMETIDAS: &str = "sesionesComprometidas";
    pub const TASA_COMPROMISO: &str = "tasaCompromiso";
    pub const TASA_REBOTE: &str = "tasaRebote";
    pub const DURACION_PROMEDIO_SESION: &str = "duracionPromedioSesion";
    pub const VISTAS_PAGINA_POR_SESION: &str = "vistasPaginaPorSesion";
    pub const CONTEO_EVENTOS: &str = "conteoEventos";
    pub const DURACION_COMPROMISO_USUARIO: &str = "duracionCompromisoUsuario";
    pub const VISTAS_PAGINA: &str = "vistasPagina";
    pub const USUARIOS_TOTALES: &str = "usuariosTotales";
    /// Derived source / medium label
    pub const CANAL: &str = "canal";
}

/// Table shaping constants
pub mod shaping {
    /// Joins source and medium into a channel label
    pub const CHANNEL_SEPARATOR: &str = " / ";
    /// Value GA4 reports for unattributed dimensions
    pub const NOT_SET: &str = "(not set)";
    /// Event renamed for display
    pub const FORM_SUBMIT_EVENT: &str = "form_submit";
    /// Display name for the availability search form
    pub const FORM_SUBMIT_LABEL: &str = "buscar_disponibilidad";
}

/// Chart slice sizes
pub mod top_n {
    pub const CHANNELS: usize = 8;
    pub const PAGES: usize = 6;
    pub const EVENTS_BAR: usize = 10;
    pub const EVENTS_PIE: usize = 6;
}

/// Process exit codes
pub mod exit_codes {
    /// Every section rendered from fetched data
    pub const SUCCESS: i32 = 0;
    /// Configuration or authentication failure, or every fetch failed
    pub const FAILURE: i32 = 1;
    /// Some sections could not be fetched or shaped
    pub const DEGRADED: i32 = 2;
}

/// Display and formatting constants
pub mod display {
    /// Emoji for success status
    pub const SUCCESS_EMOJI: &str = "✅";
    /// Emoji for warning status
    pub const WARNING_EMOJI: &str = "⚠️";
    /// Emoji for error status
    pub const ERROR_EMOJI: &str = "❌";
    /// Emoji for the hotel header
    pub const HOTEL_EMOJI: &str = "🏨";
    /// Emoji for the reporting period
    pub const CALENDAR_EMOJI: &str = "📅";
    /// Emoji for user totals
    pub const USERS_EMOJI: &str = "👥";
    /// Emoji for session totals
    pub const SESSIONS_EMOJI: &str = "🔄";
}
