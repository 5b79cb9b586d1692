//! Built-in sample data.
//!
//! An empty glossary and an empty resource list are filled from these
//! lists the first time the dashboard starts. See [`crate::store::Store::seed_defaults`].

use crate::model::{
    Difficulty, GlossaryCategory, GlossaryEntry, Resource, ResourceCategory,
};

#[allow(clippy::too_many_arguments)]
fn term(
    id: &str,
    term: &str,
    eng: &str,
    category: GlossaryCategory,
    difficulty: Difficulty,
    definition: &str,
    example: &str,
    related: &[&str],
) -> GlossaryEntry {
    GlossaryEntry {
        id: id.to_string(),
        term: term.to_string(),
        eng: eng.to_string(),
        category,
        difficulty,
        definition: definition.to_string(),
        example: example.to_string(),
        related: related.iter().map(|s| (*s).to_string()).collect(),
    }
}

fn resource(
    id: &str,
    title: &str,
    category: ResourceCategory,
    url: &str,
    description: &str,
    tags: &[&str],
) -> Resource {
    Resource {
        id: id.to_string(),
        title: title.to_string(),
        category,
        url: url.to_string(),
        description: description.to_string(),
        tags: tags.iter().map(|s| (*s).to_string()).collect(),
        date: String::new(),
    }
}

/// The 12 glossary entries a fresh dashboard starts with.
#[must_use]
pub fn default_glossary() -> Vec<GlossaryEntry> {
    use Difficulty::{Advanced, Beginner, Intermediate};
    use GlossaryCategory::{Attack, Concept, Crypto, Defense};

    vec![
        term(
            "g_sql",
            "SQL 인젝션",
            "SQL Injection",
            Attack,
            Beginner,
            "공격자가 SQL 쿼리에 악의적인 코드를 삽입해 데이터베이스를 비정상적으로 조작하는 공격 기법.",
            "' OR '1'='1 처럼 항상 참이 되는 구문을 입력해 인증을 우회하는 것이 대표적 예.",
            &["XSS", "인젝션"],
        ),
        term(
            "g_xss",
            "XSS",
            "Cross-Site Scripting",
            Attack,
            Beginner,
            "웹 페이지에 악성 스크립트를 삽입해 다른 사용자의 브라우저에서 실행되도록 만드는 공격.",
            "<script>document.cookie 를 공격자 서버로 전송하는 스크립트 삽입.",
            &["SQL 인젝션", "CSRF"],
        ),
        term(
            "g_csrf",
            "CSRF",
            "Cross-Site Request Forgery",
            Attack,
            Intermediate,
            "사용자가 인증된 상태에서 의도치 않은 요청을 서버로 보내게 만드는 공격. 쿠키 기반 인증의 약점을 이용한다.",
            "이메일 내 이미지 태그로 계정 설정 변경 요청을 자동 전송.",
            &["XSS", "세션"],
        ),
        term(
            "g_buf",
            "버퍼 오버플로우",
            "Buffer Overflow",
            Attack,
            Intermediate,
            "프로그램이 할당된 버퍼 크기를 초과하는 데이터를 쓸 때 발생하며, 이를 악용해 임의 코드를 실행할 수 있다.",
            "C언어에서 gets() 함수 사용 시 입력 길이를 검증하지 않아 발생.",
            &["스택 스매싱", "ROP"],
        ),
        term(
            "g_mitm",
            "중간자 공격",
            "Man-in-the-Middle",
            Attack,
            Intermediate,
            "공격자가 통신하는 두 당사자 사이에 끼어들어 트래픽을 도청하거나 변조하는 공격.",
            "공용 Wi-Fi에서 ARP 스푸핑으로 피해자 트래픽을 가로챔.",
            &["ARP 스푸핑", "SSL 스트리핑"],
        ),
        term(
            "g_firewall",
            "방화벽",
            "Firewall",
            Defense,
            Beginner,
            "네트워크 트래픽을 모니터링하고 사전 정의된 규칙에 따라 허용 또는 차단하는 보안 시스템.",
            "포트 22(SSH) 접근을 특정 IP만 허용하도록 방화벽 규칙 설정.",
            &["IDS", "IPS"],
        ),
        term(
            "g_ids",
            "IDS",
            "Intrusion Detection System",
            Defense,
            Intermediate,
            "네트워크 또는 시스템에서 비정상적인 활동이나 정책 위반을 탐지하는 시스템.",
            "시그니처 기반 IDS가 알려진 악성코드 패턴 탐지.",
            &["IPS", "방화벽", "SIEM"],
        ),
        term(
            "g_aes",
            "AES",
            "Advanced Encryption Standard",
            Crypto,
            Intermediate,
            "128/192/256비트 키를 사용하는 대칭키 블록 암호 알고리즘. 현재 가장 널리 사용되는 표준 암호화 방식.",
            "SSL/TLS에서 대칭키 암호화에 AES-256 사용.",
            &["RSA", "블록 암호", "대칭키"],
        ),
        term(
            "g_vuln",
            "취약점",
            "Vulnerability",
            Concept,
            Beginner,
            "소프트웨어나 시스템에 존재하는 보안상의 약점으로, 공격자가 이를 악용해 시스템을 침해할 수 있다.",
            "패치되지 않은 운영체제의 알려진 보안 취약점.",
            &["CVE", "익스플로잇", "패치"],
        ),
        term(
            "g_cve",
            "CVE",
            "Common Vulnerabilities and Exposures",
            Concept,
            Beginner,
            "공개된 보안 취약점과 노출에 대한 표준 식별자 시스템. MITRE가 관리하며 CVE-연도-번호 형식을 사용.",
            "CVE-2021-44228 (Log4Shell 취약점).",
            &["NVD", "CVSS", "취약점"],
        ),
        term(
            "g_pentest",
            "침투 테스트",
            "Penetration Testing",
            Concept,
            Intermediate,
            "시스템의 보안을 검증하기 위해 실제 공격을 시뮬레이션하는 인가된 테스트. 취약점을 발견하고 조치를 권고한다.",
            "웹 애플리케이션의 OWASP Top 10 항목을 체계적으로 점검.",
            &["레드팀", "버그 바운티", "취약점 스캔"],
        ),
        term(
            "g_zero",
            "제로데이",
            "Zero-Day",
            Attack,
            Advanced,
            "패치나 대응책이 없는 상태에서 알려진 취약점을 공격하는 것. 벤더가 취약점을 인지하기 전 또는 패치 배포 전에 발생.",
            "Stuxnet 웜이 4개의 윈도우 제로데이 취약점을 활용.",
            &["CVE", "익스플로잇", "APT"],
        ),
    ]
}

/// The 10 resources a fresh dashboard starts with.
#[must_use]
pub fn default_resources() -> Vec<Resource> {
    use ResourceCategory::{Blog, Course, Ctf, Docs, Tool};

    vec![
        resource(
            "r_owasp",
            "OWASP Top 10",
            Docs,
            "https://owasp.org/www-project-top-ten/",
            "웹 애플리케이션 보안에서 가장 중요한 10대 위험 목록. 보안 학습의 필수 출발점.",
            &["웹 보안", "필수", "무료"],
        ),
        resource(
            "r_nvd",
            "NVD - 국가 취약점 데이터베이스",
            Docs,
            "https://nvd.nist.gov/",
            "NIST가 관리하는 CVE 기반 취약점 정보 데이터베이스. CVSS 점수와 상세 분석 포함.",
            &["취약점", "CVE", "무료"],
        ),
        resource(
            "r_portswigger",
            "PortSwigger Web Security Academy",
            Course,
            "https://portswigger.net/web-security",
            "Burp Suite 제작사가 운영하는 무료 웹 보안 실습 플랫폼. SQL Injection, XSS 등 체계적 학습 가능.",
            &["무료", "실습", "웹 보안", "영어"],
        ),
        resource(
            "r_thm",
            "TryHackMe",
            Ctf,
            "https://tryhackme.com/",
            "초보자 친화적인 사이버보안 학습 플랫폼. 브라우저에서 바로 해킹 실습 환경을 제공.",
            &["실습", "입문", "CTF"],
        ),
        resource(
            "r_htb",
            "Hack The Box",
            Ctf,
            "https://www.hackthebox.com/",
            "현실적인 침투 테스트 환경을 제공하는 플랫폼. 중급~고급 학습자에게 적합.",
            &["CTF", "실습", "중급"],
        ),
        resource(
            "r_mitre",
            "MITRE ATT&CK Framework",
            Docs,
            "https://attack.mitre.org/",
            "공격자 전술·기법·절차(TTP)를 체계적으로 정리한 지식 베이스. 위협 인텔리전스 분석에 필수.",
            &["위협 인텔리전스", "ATT&CK", "무료"],
        ),
        resource(
            "r_kisa",
            "KISA 인터넷 보호나라",
            Blog,
            "https://www.krcert.or.kr/",
            "한국인터넷진흥원(KISA)의 보안 공지, 취약점 정보, 악성코드 분석 보고서 등을 제공.",
            &["한국어", "뉴스", "취약점"],
        ),
        resource(
            "r_cs50",
            "CS50 Cybersecurity (Harvard)",
            Course,
            "https://cs50.harvard.edu/cybersecurity/",
            "하버드 CS50 사이버보안 강의. 보안 기초를 탄탄히 쌓기 좋은 무료 코스.",
            &["무료", "입문", "영어", "강의"],
        ),
        resource(
            "r_ghdb",
            "Exploit-DB / Google Hacking DB",
            Tool,
            "https://www.exploit-db.com/",
            "공개 익스플로잇 코드와 Google Dork 데이터베이스 모음. 취약점 연구 및 CTF에 유용.",
            &["익스플로잇", "CTF", "무료"],
        ),
        resource(
            "r_sans",
            "SANS Reading Room",
            Blog,
            "https://www.sans.org/white-papers/",
            "SANS Institute의 보안 백서 모음. 심층 기술 자료와 연구 논문을 무료로 열람 가능.",
            &["백서", "심화", "영어", "무료"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_default_glossary_size() {
        assert_eq!(default_glossary().len(), 12);
    }

    #[test]
    fn test_default_resources_size() {
        assert_eq!(default_resources().len(), 10);
    }

    #[test]
    fn test_default_ids_unique() {
        let glossary: HashSet<_> = default_glossary().into_iter().map(|g| g.id).collect();
        assert_eq!(glossary.len(), 12);
        let resources: HashSet<_> = default_resources().into_iter().map(|r| r.id).collect();
        assert_eq!(resources.len(), 10);
    }

    #[test]
    fn test_default_glossary_attack_terms() {
        let attack: Vec<String> = default_glossary()
            .into_iter()
            .filter(|g| g.category == GlossaryCategory::Attack)
            .map(|g| g.term)
            .collect();
        assert_eq!(
            attack,
            vec!["SQL 인젝션", "XSS", "CSRF", "버퍼 오버플로우", "중간자 공격", "제로데이"]
        );
    }

    #[test]
    fn test_default_entries_have_required_fields() {
        for entry in default_glossary() {
            assert!(!entry.term.is_empty());
            assert!(!entry.definition.is_empty());
        }
        for resource in default_resources() {
            assert!(!resource.title.is_empty());
        }
    }
}
