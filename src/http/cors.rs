use vercel_runtime::{Body, Response};

pub const CORS_HEADERS: [(&str, &str); 4] = [
    ("Access-Control-Allow-Credentials", "true"),
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET,OPTIONS,PATCH,DELETE,POST,PUT"),
    (
        "Access-Control-Allow-Headers",
        "X-CSRF-Token, X-Requested-With, Accept, Accept-Version, Content-Length, Content-MD5, \
         Content-Type, Date, X-Api-Version",
    ),
];

pub fn add_cors(mut resp: Response<Body>) -> Response<Body> {
    let h = resp.headers_mut();
    for (name, value) in CORS_HEADERS {
        if let Ok(value) = value.parse() {
            h.insert(name, value);
        }
    }
    resp
}
