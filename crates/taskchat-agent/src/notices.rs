// SPDX-FileCopyrightText: 2026 Taskchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed notices posted to the channel when a reply cannot be produced.

pub const MISSING_API_KEY: &str = "Error: No se ha configurado la clave API de Gemini.";

pub const MISSING_ASSISTANT: &str = "Error: No se encontró el partner del asistente AI.";

pub const API_FAILURE: &str = "Error: Fallo al conectar con la API de Gemini.";

/// Posted when the model returned nothing or every reply post failed.
pub const DELIVERY_FAILED: &str =
    "Error: No se pudo enviar la respuesta del bot. Intenta de nuevo.";

/// Posted by the outer boundary for any other failure.
pub const UNEXPECTED: &str =
    "Error: Ocurrió un problema al procesar la solicitud. Intenta de nuevo.";
