// Library-Root: Hardware-Treiber, Tasks und Web-Oberfläche des Helms
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod tasks;
pub mod web;

// Re-exports von helmet-core
pub use helmet_core::{ControlCommand, Notification};

// Embassy Channel-Typen
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::{Receiver, Sender};
use embassy_sync::pubsub::{PubSubChannel, Publisher, Subscriber};

// ============================================================================
// Type-Aliase für Channel-Typen
// ============================================================================
//
// Statt:  Publisher<'static, NoopRawMutex, Notification, 8, 10, 1>
// Nutze:  NotificationPublisher

/// PubSubChannel für Benachrichtigungen an alle Dashboards
/// - 8: Nachrichten-Kapazität im Queue (Wort + mehrere Logs pro Tick)
/// - 10: Maximale Anzahl Subscribers (WebSocket-Verbindungen)
/// - 1: Publisher (nur der Game Loop)
pub type NotificationChannel = PubSubChannel<NoopRawMutex, Notification, 8, 10, 1>;

/// Publisher für Benachrichtigungen (Game Loop)
pub type NotificationPublisher = Publisher<'static, NoopRawMutex, Notification, 8, 10, 1>;

/// Subscriber für Benachrichtigungen (eine pro WebSocket)
pub type NotificationSubscriber = Subscriber<'static, NoopRawMutex, Notification, 8, 10, 1>;

/// Channel für Kommandos (WebSocket → Game Loop)
/// - 4: mehrere Dashboards dürfen gleichzeitig senden
pub type ControlCommandChannel = embassy_sync::channel::Channel<NoopRawMutex, ControlCommand, 4>;

/// Sender für Kommandos (WebSocket-Handler)
pub type ControlCommandSender = Sender<'static, NoopRawMutex, ControlCommand, 4>;

/// Receiver für Kommandos (Game Loop leert ihn jeden Tick)
pub type ControlCommandReceiver = Receiver<'static, NoopRawMutex, ControlCommand, 4>;
