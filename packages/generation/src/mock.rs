// ABOUTME: Canned outputs used when no AI provider is configured or every provider fails
// ABOUTME: Mock PRD built from the form, PR analysis computed from diff stats, example test cases

use prdforge_core::types::{PrdInput, PullRequestData, TestCase, TestCaseType, TestStep};
use prdforge_core::utils::generate_id;

/// Changed-line count above which a PR is flagged as large
pub const LARGE_CHANGE_LINES: u64 = 500;
/// File count above which a PR is flagged as wide
pub const MANY_FILES: usize = 10;

pub const MOCK_PROVIDER: &str = "mock";

pub fn mock_prd(input: &PrdInput) -> String {
    let features = input.non_empty_features();
    let scenarios = features
        .iter()
        .enumerate()
        .map(|(i, f)| format!("{}. {}", i + 1, f))
        .collect::<Vec<_>>()
        .join("\n");
    let mvp = features
        .iter()
        .enumerate()
        .map(|(i, f)| format!("- **기능 {}**: {}", i + 1, f))
        .collect::<Vec<_>>()
        .join("\n");
    let constraints = input.constraints_text().unwrap_or("특별한 제약사항 없음");

    format!(
        r#"## 1. 개요
### 1.1 제품 비전
{title}는 {audience}를 위한 혁신적인 솔루션입니다.

### 1.2 핵심 가치
- 사용자 중심의 직관적인 인터페이스
- 높은 성능과 안정성
- 확장 가능한 아키텍처

## 2. 목표 및 성공 지표
### 2.1 비즈니스 목표
{objectives}

### 2.2 성공 지표 (KPIs)
- 사용자 만족도 90% 이상
- 일일 활성 사용자(DAU) 10,000명 달성
- 평균 세션 시간 15분 이상

## 3. 사용자 스토리
### 3.1 주요 사용자 페르소나
**타겟 사용자**: {audience}

### 3.2 사용자 시나리오
사용자는 다음과 같은 작업을 수행할 수 있어야 합니다:
{scenarios}

## 4. 기능 요구사항
### 4.1 필수 기능 (MVP)
{mvp}

### 4.2 추가 기능
- 고급 분석 대시보드
- 다국어 지원
- 모바일 앱 연동

## 5. 비기능 요구사항
### 5.1 성능 요구사항
- 페이지 로딩 시간 3초 이내
- 동시 사용자 1,000명 이상 지원
- 99.9% 가용성

### 5.2 보안 요구사항
- HTTPS 암호화 통신
- OAuth 2.0 인증
- GDPR 준수

### 5.3 사용성 요구사항
- 반응형 웹 디자인
- 웹 접근성 WCAG 2.1 Level AA 준수
- 직관적인 네비게이션

## 6. 제약사항 및 리스크
### 6.1 기술적 제약사항
{constraints}

### 6.2 비즈니스 제약사항
- 개발 기간: 3개월
- 예산: 제한적

### 6.3 주요 리스크 및 대응 방안
- **리스크 1**: 기술적 복잡도 → 단계적 구현
- **리스크 2**: 사용자 채택률 → 베타 테스트 진행

## 7. 일정 및 마일스톤
### 7.1 개발 단계
- **Phase 1** (4주): 기획 및 설계
- **Phase 2** (8주): 개발 및 구현
- **Phase 3** (4주): 테스트 및 배포

### 7.2 주요 마일스톤
- M1: 프로토타입 완성
- M2: MVP 출시
- M3: 정식 버전 출시

## 8. 부록
### 8.1 용어 정의
- MVP: Minimum Viable Product (최소 기능 제품)
- KPI: Key Performance Indicator (핵심 성과 지표)

### 8.2 참고 자료
- 시장 조사 보고서
- 경쟁사 분석 자료

---
*이 문서는 Mock 데이터로 생성되었습니다. 실제 AI API를 사용하려면 .env 파일에 유효한 GEMINI_API_KEY 또는 OPENAI_API_KEY를 설정하세요.*"#,
        title = input.title,
        audience = input.target_audience,
        objectives = input.objectives,
        scenarios = scenarios,
        mvp = mvp,
        constraints = constraints,
    )
}

pub fn mock_pr_analysis(pr: &PullRequestData) -> String {
    let main_files = pr
        .files
        .iter()
        .take(3)
        .map(|f| f.filename.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let affected = bullet_list(pr.files.iter().take(5).map(|f| f.filename.as_str()));
    let test_targets = bullet_list(
        pr.files
            .iter()
            .filter(|f| f.status != "removed")
            .take(5)
            .map(|f| f.filename.as_str()),
    );

    let scale = if pr.total_changed_lines() > LARGE_CHANGE_LINES {
        "대규모 변경으로 충분한 테스트 필요"
    } else {
        "중소규모 변경"
    };
    let breadth = if pr.files.len() > MANY_FILES {
        "다수 파일 변경으로 영향 범위 확인 필요"
    } else {
        "적절한 범위"
    };

    format!(
        r#"## PR 분석 결과 (Mock)

### 1. 주요 변경사항 요약
- {count}개 파일 변경
- 추가: {additions}줄, 삭제: {deletions}줄
- 주요 변경 파일: {main_files}

### 2. 영향받는 기능/모듈
{affected}

### 3. 잠재적 리스크
- 변경 규모: {scale}
- 파일 수: {breadth}

### 4. 테스트가 필요한 영역
{test_targets}

### 5. 코드 품질 개선 제안
- 코드 리뷰 진행 필요
- 단위 테스트 추가 권장
- 문서화 업데이트 확인"#,
        count = pr.files.len(),
        additions = pr.additions,
        deletions = pr.deletions,
    )
}

fn bullet_list<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn step(action: &str, expected: &str) -> TestStep {
    TestStep {
        action: action.to_string(),
        expected_result: expected.to_string(),
    }
}

/// Returned instead of an empty list when nothing in the AI output parses
pub fn example_test_cases() -> Vec<TestCase> {
    vec![
        TestCase {
            id: generate_id("tc"),
            title: "사용자 로그인 기능 테스트".to_string(),
            test_type: TestCaseType::Functional,
            description: "사용자가 정상적으로 로그인할 수 있는지 확인".to_string(),
            steps: vec![
                step("로그인 페이지 접속", "로그인 폼이 표시됨"),
                step(
                    "유효한 이메일과 비밀번호 입력",
                    "입력 필드에 값이 정상적으로 입력됨",
                ),
                step("로그인 버튼 클릭", "로그인 처리 중 로딩 표시"),
            ],
            expected_result: "로그인 성공 후 대시보드로 이동".to_string(),
        },
        TestCase {
            id: generate_id("tc"),
            title: "잘못된 비밀번호 입력 시 에러 처리".to_string(),
            test_type: TestCaseType::EdgeCase,
            description: "잘못된 비밀번호 입력 시 적절한 에러 메시지 표시 확인".to_string(),
            steps: vec![
                step("로그인 페이지 접속", "로그인 폼이 표시됨"),
                step("유효한 이메일과 잘못된 비밀번호 입력", "입력 필드에 값이 입력됨"),
                step("로그인 버튼 클릭", "에러 메시지 표시"),
            ],
            expected_result: "비밀번호가 일치하지 않습니다 메시지 표시".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use prdforge_core::types::FileChange;

    fn file(name: &str, status: &str) -> FileChange {
        FileChange {
            filename: name.to_string(),
            status: status.to_string(),
            additions: 1,
            deletions: 0,
            changes: 1,
        }
    }

    fn pr_with(files: Vec<FileChange>, additions: u64, deletions: u64) -> PullRequestData {
        PullRequestData {
            url: "https://github.com/a/b/pull/1".to_string(),
            owner: "a".to_string(),
            repo: "b".to_string(),
            pr_number: 1,
            title: "t".to_string(),
            description: None,
            author: "kim".to_string(),
            state: "open".to_string(),
            base: "main".to_string(),
            head: "feat".to_string(),
            additions,
            deletions,
            diff: String::new(),
            commits: vec![],
            files,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_mock_prd_embeds_form_fields() {
        let input = PrdInput {
            title: "할 일 앱".to_string(),
            objectives: "생산성 향상".to_string(),
            features: vec!["할 일 추가".to_string(), "".to_string(), "알림".to_string()],
            target_audience: "대학생".to_string(),
            constraints: None,
        };

        let prd = mock_prd(&input);

        assert!(prd.contains("할 일 앱는 대학생를 위한 혁신적인 솔루션입니다."));
        assert!(prd.contains("### 2.1 비즈니스 목표\n생산성 향상"));
        assert!(prd.contains("1. 할 일 추가\n2. 알림"));
        assert!(prd.contains("- **기능 2**: 알림"));
        assert!(prd.contains("### 6.1 기술적 제약사항\n특별한 제약사항 없음"));
    }

    #[test]
    fn test_mock_analysis_small_pr() {
        let files = vec![
            file("a.rs", "modified"),
            file("b.rs", "removed"),
            file("c.rs", "added"),
            file("d.rs", "added"),
        ];
        let analysis = mock_pr_analysis(&pr_with(files, 40, 10));

        assert!(analysis.contains("- 4개 파일 변경"));
        assert!(analysis.contains("- 추가: 40줄, 삭제: 10줄"));
        assert!(analysis.contains("- 주요 변경 파일: a.rs, b.rs, c.rs"));
        assert!(analysis.contains("- 변경 규모: 중소규모 변경"));
        assert!(analysis.contains("- 파일 수: 적절한 범위"));
        assert!(analysis.contains("### 4. 테스트가 필요한 영역\n- a.rs\n- c.rs\n- d.rs\n"));
    }

    #[test]
    fn test_mock_analysis_flags_large_wide_pr() {
        let files = (0..12).map(|i| file(&format!("f{}.rs", i), "modified")).collect();
        let analysis = mock_pr_analysis(&pr_with(files, 400, 101));

        assert!(analysis.contains("대규모 변경으로 충분한 테스트 필요"));
        assert!(analysis.contains("다수 파일 변경으로 영향 범위 확인 필요"));
        assert!(analysis.contains("### 2. 영향받는 기능/모듈\n- f0.rs\n- f1.rs\n- f2.rs\n- f3.rs\n- f4.rs\n\n"));
    }

    #[test]
    fn test_example_cases_have_unique_ids() {
        let cases = example_test_cases();
        assert_eq!(cases.len(), 2);
        assert_ne!(cases[0].id, cases[1].id);
        assert_eq!(cases[1].test_type, TestCaseType::EdgeCase);
    }
}
