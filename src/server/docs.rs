//! OpenAPI document and Swagger UI page.

use serde_json::{json, Value};

pub const SWAGGER_UI: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>tubeseo API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    window.onload = () => {
      window.ui = SwaggerUIBundle({ url: "/openapi.json", dom_id: "#swagger-ui" });
    };
  </script>
</body>
</html>
"##;

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Error" } } }
    })
}

/// OpenAPI 3 description of the HTTP API.
pub fn openapi() -> Value {
    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "tubeseo",
            "description": "YouTube SEO analysis: video extraction, keyword research, content analysis and SEO suggestions.",
            "version": env!("CARGO_PKG_VERSION")
        },
        "paths": {
            "/": {
                "get": {
                    "summary": "Welcome message and endpoint list",
                    "responses": { "200": { "description": "Welcome message" } }
                }
            },
            "/health": {
                "get": {
                    "summary": "Liveness check",
                    "responses": { "200": { "description": "Service is up" } }
                }
            },
            "/analyze": {
                "post": {
                    "summary": "Analyze a video and/or keyword and generate SEO suggestions",
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/AnalysisRequest" } } }
                    },
                    "responses": {
                        "200": {
                            "description": "Analysis report",
                            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/AnalysisReport" } } }
                        },
                        "400": error_response("Missing or invalid input"),
                        "404": error_response("Video not found"),
                        "429": error_response("YouTube API quota exceeded"),
                        "502": error_response("Upstream service error"),
                        "500": error_response("Internal error")
                    }
                }
            },
            "/results": {
                "get": {
                    "summary": "List stored reports, newest first",
                    "responses": { "200": { "description": "Stored reports" } }
                }
            },
            "/results/{name}": {
                "get": {
                    "summary": "Fetch a stored report",
                    "parameters": [{
                        "name": "name", "in": "path", "required": true,
                        "schema": { "type": "string", "example": "analysis_20240101_120000.json" }
                    }],
                    "responses": {
                        "200": { "description": "Stored report" },
                        "400": error_response("Invalid report name"),
                        "404": error_response("Report not found")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "AnalysisRequest": {
                    "type": "object",
                    "properties": {
                        "url": { "type": "string", "format": "uri", "nullable": true, "description": "YouTube video URL" },
                        "keyword": { "type": "string", "nullable": true, "description": "Target keyword; defaults to the video title" },
                        "use_gpt": { "type": "boolean", "default": false, "description": "Generate titles and description with the language model" }
                    }
                },
                "AnalysisReport": {
                    "type": "object",
                    "required": ["id", "seo_suggestions", "keyword_analysis", "sentiment_analysis", "timestamp", "generated_at"],
                    "properties": {
                        "id": { "type": "string", "format": "uuid" },
                        "video_data": { "type": "object", "nullable": true },
                        "seo_suggestions": { "type": "object", "description": "Suggestions, or {\"error\": ...} when generation failed" },
                        "keyword_analysis": { "type": "object", "description": "Research, or {\"error\": ...} when research failed" },
                        "sentiment_analysis": { "type": "object", "description": "Content analysis, or {\"error\": ...}" },
                        "timestamp": { "type": "string", "example": "20240101_120000" },
                        "generated_at": { "type": "string", "format": "date-time" }
                    }
                },
                "Error": {
                    "type": "object",
                    "properties": { "detail": { "type": "string" } }
                }
            }
        }
    })
}
