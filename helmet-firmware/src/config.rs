// Board-Konfiguration: Pins, Puffer, Heap und Zugangsdaten
//
// Spiel-Parameter (Schwellwerte, Intervalle) liegen in helmet_core::config.
// Die Pin-Zuordnung passiert in main.rs über die `peripherals.GPIOx`
// Felder und ist dort kommentiert.
#![allow(dead_code)]

// ============================================================================
// LED-Strip Konfiguration
// ============================================================================

/// GPIO-Pin für die Datenleitung des WS2812-Strips
pub const LED_GPIO_PIN: u8 = 8;

/// Anzahl der LEDs im Helm-Strip
pub const LED_COUNT: usize = 83;

/// RMT Taktfrequenz in MHz
/// 80 MHz ist optimal für WS2812 LED-Timing
pub const RMT_CLOCK_MHZ: u32 = 80;

/// RMT-Puffer: 24 Pulse pro LED + 1 Reset
pub const LED_BUFFER_SIZE: usize = LED_COUNT * 24 + 1;

// ============================================================================
// Sensoren & Aktoren
// ============================================================================

/// Quadratur-Flanken pro Rastung
pub const ROTARY_STEPS_PER_DETENT: i32 = 4;

/// Tastverhältnis während ein Ton klingt (Rechteck)
pub const BUZZER_DUTY_PCT: u8 = 50;

/// Maximale Messdistanz in cm (darüber: "kein Echo")
pub const SONAR_MAX_DISTANCE_CM: u32 = 400;
/// Laufzeit pro cm (Hin- und Rückweg) in µs
pub const SONAR_US_PER_CM: u32 = 57;

/// Display-Helligkeit (0-7)
pub const TM1637_BRIGHTNESS: u8 = 7;

/// I2C-Takt für den MPU6050
pub const I2C_FREQUENCY_KHZ: u32 = 400;

// ============================================================================
// Game Loop
// ============================================================================

/// Pause zwischen zwei Ticks der Hauptschleife
/// Gibt die CPU an WiFi- und HTTP-Tasks ab
pub const GAME_TICK_INTERVAL_MS: u64 = 1;

// ============================================================================
// WiFi Konfiguration
// ============================================================================

/// WiFi SSID (Netzwerk-Name)
/// Wird zur Build-Zeit aus der Environment Variable WIFI_SSID geladen
/// Setze diese in .env file (siehe .env.example)
pub const WIFI_SSID: &str = env!(
    "WIFI_SSID",
    "WiFi SSID nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// WiFi Passwort
/// Wird zur Build-Zeit aus der Environment Variable WIFI_PASSWORD geladen
/// Setze diese in .env file (siehe .env.example)
pub const WIFI_PASSWORD: &str = env!(
    "WIFI_PASSWORD",
    "WiFi Password nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Wartezeit nach fehlgeschlagenem Verbindungsversuch
pub const WIFI_RETRY_DELAY_SECS: u64 = 5;

/// Heap-Größe für WiFi (Bytes)
/// WiFi benötigt dynamischen Speicher für Pakete
pub const WIFI_HEAP_SIZE: usize = 65536; // 64 KB

/// Zusätzliche Heap-Größe (Bytes)
pub const EXTRA_HEAP_SIZE: usize = 36864; // 36 KB

// ============================================================================
// HTTP Server Konfiguration
// ============================================================================

/// Anzahl paralleler HTTP-Server-Tasks
pub const HTTP_TASK_COUNT: usize = 4;

/// HTTP Buffer-Größe in Bytes
/// Für HTTP Request/Response Headers und Body
pub const HTTP_BUFFER_SIZE: usize = 1024;

/// TCP RX Buffer-Größe in Bytes
pub const TCP_RX_BUFFER_SIZE: usize = 1024;

/// TCP TX Buffer-Größe in Bytes
pub const TCP_TX_BUFFER_SIZE: usize = 1024;

/// WebSocket Message Buffer-Größe in Bytes
/// 16 Farben + Wort + Timer passen in < 400 Bytes JSON
pub const WEBSOCKET_BUFFER_SIZE: usize = 512;

/// JSON-Buffer für ausgehende Benachrichtigungen
/// Längste Nachricht ist das Drehgeber-Log mit "breathing" (< 64 Bytes)
pub const JSON_NOTIFICATION_BUFFER_SIZE: usize = 128;
