//! 터미널 출력 포맷팅
//!
//! 서버 시작 요약과 진단 도구 출력에 사용합니다.

pub fn print_boxed_title(title: &str) {
    // 고정 너비 50칸 사용 (박스 내부 콘텐츠)
    let content_width = 50;
    let border = "═".repeat(content_width);

    println!("╔{}╗", border);
    println!("║{:^50}║", title);
    println!("╚{}╝", border);
}

pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

/// 서버 시작 요약
pub fn print_startup_summary(bind_address: &str, database: &str, events: &str, sign_up_enabled: bool) {
    println!();
    print_boxed_title("🚀 ACCOUNT SERVICE READY");
    print_sub_task("Listening", &format!("http://{}", bind_address));
    print_sub_task("Database", database);
    print_sub_task("Onboarding events", events);
    print_sub_task("Email sign-up", if sign_up_enabled { "enabled" } else { "disabled" });
    println!();
}
